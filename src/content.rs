pub const OWNER_FIRST_NAME: &str = "Steve";
pub const OWNER_LAST_NAME: &str = "Bayonne";
pub const HERO_TITLE: &str = "Developpeur Full Stack Junior";
pub const HERO_DESCRIPTION: &str = "Passionne par le developpement web moderne, je cree des experiences utilisateur exceptionnelles avec les dernieres technologies frontend et backend.";
pub const RESUME_PATH: &str = "/documents/CV_Steve_Bayonne.pdf";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Stat {
    pub value: u64,
    pub label: &'static str,
    pub suffix: Option<&'static str>,
}

pub const STATS: [Stat; 3] = [
    Stat {
        value: 6,
        label: "Projets Full Stack",
        suffix: None,
    },
    Stat {
        value: 11,
        label: "Technologies",
        suffix: None,
    },
    Stat {
        value: 100,
        label: "Motivation",
        suffix: Some("%"),
    },
];

pub const ABOUT_HIGHLIGHTS: [&str; 5] = [
    "Frontend moderne avec React & Tailwind CSS",
    "Backend robuste avec Django & Python",
    "Gestion de bases de donnees MySQL & PostgreSQL",
    "Developpement d'APIs REST & test avec Postman",
    "Versioning avec Git & collaboration sur GitHub",
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub category_label: &'static str,
    pub image: &'static str,
    pub technologies: &'static [&'static str],
    pub live_url: &'static str,
    pub features: &'static [&'static str],
}

pub const PROJECTS: [Project; 5] = [
    Project {
        id: "pressing",
        title: "Gestion de Pressing",
        description: "Application web complete pour la gestion d'un pressing avec systeme de suivi des commandes.",
        category: "web",
        category_label: "Application Web",
        image: "/images/projet1.png",
        technologies: &["HTML5", "CSS3", "JavaScript"],
        live_url: "https://www.stevepressing.infy.uk/",
        features: &[
            "Systeme de suivi des commandes en temps reel",
            "Gestion des clients et historique",
            "Interface intuitive et responsive",
        ],
    },
    Project {
        id: "ecommerce",
        title: "Boutique en ligne",
        description: "Plateforme e-commerce moderne avec panier d'achat et systeme de paiement integre.",
        category: "web",
        category_label: "E-commerce",
        image: "/images/projet3.png",
        technologies: &["HTML5", "CSS3", "JavaScript"],
        live_url: "https://steveshop.free.nf/",
        features: &[
            "Catalogue produits dynamique",
            "Panier d'achat interactif",
            "Systeme de filtrage avance",
        ],
    },
    Project {
        id: "immobilier",
        title: "Site Immobilier",
        description: "Plateforme de vente immobiliere avec recherche avancee et galerie interactive.",
        category: "web",
        category_label: "Immobilier",
        image: "/images/projet4.png",
        technologies: &["HTML5", "CSS3", "JavaScript"],
        live_url: "https://stevebay0605.github.io/immo/",
        features: &[
            "Recherche avancee multi-criteres",
            "Galerie photos interactive",
            "Formulaire de contact integre",
        ],
    },
    Project {
        id: "taskflow",
        title: "TaskFlow",
        description: "Application de gestion de taches moderne developpee avec React pour une productivite optimale.",
        category: "web",
        category_label: "Application React",
        image: "/images/projet5.png",
        technologies: &["React", "JavaScript", "Tailwind CSS"],
        live_url: "https://stevetaskflow.netlify.app/",
        features: &[
            "Drag & drop des taches",
            "Categories et priorites",
            "Interface moderne et responsive",
        ],
    },
    Project {
        id: "ecommerce-v2",
        title: "E-commerce v2",
        description: "Plateforme e-commerce avancee avec frontend React et backend Django, stylisee avec Tailwind CSS.",
        category: "web",
        category_label: "Full Stack",
        image: "/images/projet6.png",
        technologies: &["React", "Django", "Tailwind CSS"],
        live_url: "https://stevecom.netlify.app/",
        features: &[
            "Architecture Full Stack",
            "API REST Django",
            "Authentification utilisateur",
        ],
    },
];

pub const ALL_CATEGORIES: &str = "all";

pub const PROJECT_FILTERS: [(&str, &str); 2] = [(ALL_CATEGORIES, "Tous"), ("web", "Web")];

pub fn filter_projects(category: &str) -> Vec<&'static Project> {
    PROJECTS
        .iter()
        .filter(|project| category == ALL_CATEGORIES || project.category == category)
        .collect()
}

pub fn card_delay_ms(index: usize) -> u32 {
    300 + index.min(100) as u32 * 100
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Skill {
    pub name: &'static str,
    pub percent: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SkillCategory {
    pub title: &'static str,
    pub skills: &'static [Skill],
}

const fn skill(name: &'static str, percent: u8) -> Skill {
    Skill { name, percent }
}

pub const SKILL_CATEGORIES: [SkillCategory; 3] = [
    SkillCategory {
        title: "Frontend Development",
        skills: &[
            skill("HTML5", 90),
            skill("CSS3", 85),
            skill("JavaScript", 70),
            skill("Tailwind CSS", 80),
            skill("React", 65),
        ],
    },
    SkillCategory {
        title: "Backend & Database",
        skills: &[
            skill("Django", 60),
            skill("Python", 70),
            skill("MySQL", 65),
            skill("PostgreSQL", 65),
            skill("Django REST Framework", 65),
            skill("API REST", 65),
        ],
    },
    SkillCategory {
        title: "Outils",
        skills: &[
            skill("Git & GitHub", 75),
            skill("Postman", 70),
            skill("Responsive Design", 85),
            skill("VS Code", 85),
            skill("npm / pip", 70),
        ],
    },
];

pub const LEARNING_GOALS: [Skill; 4] = [
    skill("TypeScript", 30),
    skill("Next.js", 25),
    skill("Node.js", 20),
    skill("Docker", 15),
];
