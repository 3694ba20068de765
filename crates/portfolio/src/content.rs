//! Static content records shown by the page sections.
//!
//! Everything here is created once and never mutated. Outbound links are
//! inert strings: they are displayed, never opened.

/// In-page anchors, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Home,
    About,
    Skills,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
        }
    }

    pub fn anchor(self) -> &'static str {
        match self {
            Section::Home => "#home",
            Section::About => "#about",
            Section::Skills => "#skills",
            Section::Projects => "#projects",
            Section::Contact => "#contact",
        }
    }

    /// Section title and subtitle. The hero has its own header.
    pub fn heading(self) -> Option<(&'static str, &'static str)> {
        match self {
            Section::Home => None,
            Section::About => Some((
                "About Me",
                "Passionate about building intelligent systems and pushing the boundaries of AI",
            )),
            Section::Skills => Some((
                "Technical Skills",
                "Technologies and tools I use to build amazing things",
            )),
            Section::Projects => Some((
                "Projects",
                "A selection of my recent work and experiments",
            )),
            Section::Contact => Some((
                "Get In Touch",
                "I'm always open to discussing new opportunities, research collaborations, \
                 or interesting AI/ML projects.",
            )),
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|s| s.anchor() == anchor)
    }
}

pub struct Hero {
    pub badge: &'static str,
    pub name: &'static str,
    pub subtitle: &'static str,
    pub location: &'static str,
}

pub const LOGO: &str = "Babitdor.";

pub const HERO: Hero = Hero {
    badge: "Available for work",
    name: "Babitdor Kayang Khonglah",
    subtitle: "AI/ML Engineer specializing in LLM orchestration, RAG architectures, \
               and building intelligent systems that scale.",
    location: "Erlangen, Germany",
};

pub struct Link {
    pub label: &'static str,
    pub href: &'static str,
}

pub const SOCIAL_LINKS: &[Link] = &[
    Link {
        label: "GitHub",
        href: "https://github.com/Babitdor",
    },
    Link {
        label: "LinkedIn",
        href: "https://www.linkedin.com/in/babitdor-kayang-khonglah-aa1b68207/",
    },
    Link {
        label: "Email",
        href: "mailto:babitdorbryan14@gmail.com",
    },
];

pub struct Skill {
    pub name: &'static str,
    pub category: &'static str,
}

pub const SKILLS: &[Skill] = &[
    Skill { name: "Python", category: "Language" },
    Skill { name: "JavaScript", category: "Language" },
    Skill { name: "TypeScript", category: "Language" },
    Skill { name: "C++", category: "Language" },
    Skill { name: "LangGraph", category: "AI/ML" },
    Skill { name: "LangChain", category: "AI/ML" },
    Skill { name: "CrewAI", category: "AI/ML" },
    Skill { name: "RAG", category: "AI/ML" },
    Skill { name: "LLM", category: "AI/ML" },
    Skill { name: "Docker", category: "DevOps" },
    Skill { name: "PostgreSQL", category: "Database" },
    Skill { name: "MongoDB", category: "Database" },
    Skill { name: "Vector DB", category: "Database" },
    Skill { name: "Git", category: "DevOps" },
    Skill { name: "React", category: "Frontend" },
    Skill { name: "Node.js", category: "Backend" },
];

/// Distinct skill categories in first-seen order.
pub fn skill_categories() -> Vec<&'static str> {
    let mut categories: Vec<&'static str> = Vec::new();
    for skill in SKILLS {
        if !categories.contains(&skill.category) {
            categories.push(skill.category);
        }
    }
    categories
}

pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub github: &'static str,
    pub link: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Multi-Agent Research Intelligence System",
        description: "Multi-agent research system orchestrating specialized agents to research, \
                      synthesize information and generate reports, with parallel swarm research, \
                      self-critique and RAG knowledge management.",
        tags: &["LangGraph", "LangChain", "Python", "RAG", "ChromaDB", "Multi-Agent", "Ollama"],
        github: "https://github.com/Babitdor",
        link: "https://github.com/Babitdor",
    },
    Project {
        title: "SysML v2 Multi-Agent Workflow Automation",
        description: "Generates and validates SysML v2 code with a multi-agent architecture, \
                      multi-step syntax and semantic validation, automatic error fixing and a \
                      ChromaDB solution memory.",
        tags: &["LangGraph", "LangChain", "Python", "RAG", "ChromaDB", "Ollama", "Streamlit"],
        github: "https://github.com/Babitdor",
        link: "https://github.com/Babitdor",
    },
    Project {
        title: "Nami-Code: Deep Agent Framework & AI Coding Assistant",
        description: "Open-source agent framework and terminal coding assistant with planning \
                      tools, filesystem operations, subagent spawning, persistent memory and MCP \
                      support.",
        tags: &["LangGraph", "LangChain", "Python", "OpenAI", "Anthropic", "Ollama", "MCP"],
        github: "https://github.com/Babitdor",
        link: "https://github.com/Babitdor",
    },
    Project {
        title: "S.A.R.A.H. – Smart Assistant Real At Heart",
        description: "Fully local desktop voice assistant on a fine-tuned LLaMA 3.2 with a \
                      real-time STT → LLM → TTS pipeline, running offline.",
        tags: &["LLaMA 3.2", "LiveKit", "Deepgram", "Cartesia AI", "STT", "TTS", "Local AI"],
        github: "https://github.com/Babitdor",
        link: "https://github.com/Babitdor",
    },
    Project {
        title: "Speaker Voice Separation with Dual-Path Transformers",
        description: "Dual-Path RNN with intra-chunk and inter-chunk Transformer layers for \
                      multi-speaker separation.",
        tags: &["PyTorch", "Transformers", "Audio Processing", "Deep Learning", "SI-SNR"],
        github: "https://github.com/Babitdor",
        link: "https://github.com/Babitdor",
    },
    Project {
        title: "Assistive Sidewalk Segmentation with SAM 2.1",
        description: "Training and deployment pipeline fine-tuning SAM 2.1 on custom sidewalk \
                      imagery for assistive vision, with a Streamlit app for real-time inference.",
        tags: &["SAM 2.1", "PyTorch", "Hugging Face", "Streamlit", "Computer Vision"],
        github: "https://github.com/Babitdor",
        link: "https://github.com/Babitdor",
    },
    Project {
        title: "ogAI: Multi-Model LLM Discord Assistant",
        description: "Discord bot routing between local and cloud language models with prompt \
                      templates and conversation context tracking.",
        tags: &["discord.py", "OpenAI GPT", "Google Gemini", "Ollama", "Async"],
        github: "https://github.com/Babitdor",
        link: "https://github.com/Babitdor",
    },
    Project {
        title: "N8N-Framework: AI-Powered SysMLv2 Systems Engineering Platform",
        description: "Systems engineering platform combining SysMLv2 with multi-agent LLMs on \
                      n8n, with ANTLR4-based validation and Eclipse SysON integration.",
        tags: &["n8n", "Next.js", "LangGraph", "FastAPI", "SysMLv2", "Qdrant", "Docker"],
        github: "https://github.com/Babitdor",
        link: "https://github.com/Babitdor",
    },
];

pub struct ContactMethod {
    pub label: &'static str,
    pub value: &'static str,
    pub href: &'static str,
}

pub const CONTACT_METHODS: &[ContactMethod] = &[
    ContactMethod {
        label: "Email",
        value: "babitdorbryan14@gmail.com",
        href: "mailto:babitdorbryan14@gmail.com",
    },
    ContactMethod {
        label: "Phone",
        value: "+49 176 37280448",
        href: "tel:+4917637280448",
    },
    ContactMethod {
        label: "LinkedIn",
        value: "Connect with me",
        href: "https://www.linkedin.com/in/babitdor-kayang-khonglah-aa1b68207/",
    },
    ContactMethod {
        label: "GitHub",
        value: "View my code",
        href: "https://github.com/Babitdor",
    },
];

pub struct Education {
    pub degree: &'static str,
    pub school: &'static str,
    pub period: &'static str,
}

pub const EDUCATION: &[Education] = &[
    Education {
        degree: "M.Sc. Artificial Intelligence",
        school: "Friedrich-Alexander-Universität Erlangen–Nürnberg",
        period: "03/2024 – Present",
    },
    Education {
        degree: "B.Tech. Computer Science & Engineering",
        school: "National Institute of Technology, Meghalaya",
        period: "04/2018 – 04/2022",
    },
];

pub struct Stat {
    pub number: &'static str,
    pub label: &'static str,
}

pub const STATS: &[Stat] = &[
    Stat { number: "5+", label: "Projects Completed" },
    Stat { number: "3+", label: "Years Experience" },
    Stat { number: "10+", label: "Technologies" },
];

pub const ABOUT_TEXT: &[&str] = &[
    "I'm an AI/ML Engineer specializing in LLM orchestration and RAG architectures. \
     Currently pursuing my Master's in Artificial Intelligence at FAU Erlangen-Nürnberg, \
     I build intelligent systems that leverage cutting-edge AI technologies.",
    "My expertise spans multi-agent workflows, vector databases, and deploying AI solutions \
     at scale.",
];

pub const FOOTER_TAGLINE: &str = "AI/ML Engineer | LLM Specialist";

pub fn copyright(year: i32) -> String {
    format!("© {year} {}. All rights reserved.", HERO.name)
}
