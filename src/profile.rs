use std::fmt::Write as _;

use anyhow::{anyhow, Result};
use colored::Colorize;

/// A titled group of short items (areas of expertise, skills, certificates).
#[derive(Debug, Clone, Copy)]
pub struct ItemGroup {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub title: &'static str,
    pub tools: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct Experience {
    pub role: &'static str,
    pub org: &'static str,
    pub period: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Education {
    pub degree: &'static str,
    pub school: &'static str,
    pub location: &'static str,
    pub period: &'static str,
    pub details: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub email: &'static str,
    pub github: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct AdditionalInfo {
    pub languages: &'static str,
    pub location: &'static str,
    pub visa: &'static str,
}

/// Everything the portfolio shows. All of it is read-only.
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub name: &'static str,
    pub headline: &'static str,
    pub summary_brief: &'static str,
    pub summary_full: &'static str,
    pub expertise: &'static [ItemGroup],
    pub skills: &'static [ItemGroup],
    pub projects: &'static [Project],
    pub experience: &'static [Experience],
    pub education: &'static [Education],
    pub certificates: &'static [ItemGroup],
    pub additional: AdditionalInfo,
    pub contact: Contact,
}

pub static PROFILE: Profile = Profile {
    name: "Mohamed Elmugtaba",
    headline: "Bioinformatics Professional & Pharmacist",
    summary_brief: "Bioinformatics Professional & Pharmacist bridging clinical science and \
computational data. I aim to redefine the frontier of discovery: using pharmaceutical insight \
to frame the essential biological questions and computational innovation to manifest the \
data-driven answers that make precision medicine a reality.",
    summary_full: "I am a Bioinformatics Professional and Pharmacist bridging clinical science \
and computational data. My career is built on a unique feedback loop: leveraging pharmaceutical \
expertise to frame critical biological questions and utilising advanced bioinformatics to \
manifest the data-driven answers that make precision medicine a reality.\n\n\
I specialise in the development of scalable Single-Cell and NGS workflows, with a focus on \
transforming complex genomic datasets into actionable therapeutic insights. My goal is to stay \
at the leading edge of global computational trends, harnessing tools like Nextflow and \
high-performance pipelines to accelerate discovery and drive the future of personalised \
healthcare.",
    expertise: &[
        ItemGroup {
            title: "Bioinformatics",
            items: &[
                "Single-Cell RNA-seq",
                "NGS Workflows",
                "Spatial Transcriptomics",
                "Multi-omic Analysis",
            ],
        },
        ItemGroup {
            title: "Pharmaceutical Science",
            items: &[
                "Clinical Pharmacology",
                "Precision Medicine",
                "Mechanism of Action",
                "Drug Efficacy & Safety",
            ],
        },
        ItemGroup {
            title: "Operations & Cloud",
            items: &[
                "Digital Transformation",
                "Process Optimisation",
                "Data Governance",
                "AI/ML Innovation",
            ],
        },
    ],
    skills: &[
        ItemGroup {
            title: "Languages & Scripting",
            items: &["Python", "R Language", "Bash Scripting", "Linux CLI"],
        },
        ItemGroup {
            title: "Bioinformatics Tools",
            items: &["Scanpy", "Scarf", "Scanorama", "Nextflow", "Zarr", "Dask"],
        },
        ItemGroup {
            title: "Data Environments",
            items: &["Jupyter Notebook", "RStudio", "Conda", "GCP Foundations"],
        },
    ],
    projects: &[
        Project {
            title: "Covid-19 Single-Cell Analysis",
            tools: "Python | Scanpy | Jupyter Notebook",
            description: "Conducted scRNA-seq downstream analysis on six PBMC samples to \
identify transcriptomic differences between COVID-19 patients and healthy controls. Engineered \
a comprehensive pipeline encompassing quality control, dimensionality reduction, clustering, \
differential expression, and cell-type prediction.",
            tags: &["scRNA-seq", "COVID-19", "Scanpy"],
        },
        Project {
            title: "Spatial Transcriptomics & scRNA-seq Integration",
            tools: "Python | Scanpy | Scanorama",
            description: "Integrated spatial datasets with single-cell RNA-seq references \
using the Scanorama algorithm for accurate batch correction and cell-type mapping. Developed \
advanced visualisations to map gene expression within original tissue architectures, \
successfully preserving spatial biological context.",
            tags: &["Spatial", "Integration", "Scanorama"],
        },
        Project {
            title: "Memory-Efficient scRNA-seq Analysis (Scarf)",
            tools: "Python | Scarf | Zarr | Dask",
            description: "Optimised analysis for a 10x Genomics 5K PBMC dataset using the \
Scarf package, leveraging Zarr and Dask for low-memory data chunking. Applied KNN mapping and \
label transfer techniques to embed target cells onto reference manifolds.",
            tags: &["Big Data", "Dask", "Zarr"],
        },
        Project {
            title: "Data Visualisation with ggplot2",
            tools: "R | RStudio | ggplot2 | Tidyverse",
            description: "Generated publication-quality visualisations using the \"Grammar \
of Graphics\" framework to translate raw data into insightful graphical representations. \
Executed Exploratory Data Analysis (EDA) utilising distribution plots, correlation analysis, \
and complex faceted layouts.",
            tags: &["R", "ggplot2", "EDA"],
        },
    ],
    experience: &[
        Experience {
            role: "Scientific Engagement Officer",
            org: "Salmawit Co. Ltd",
            period: "2021 - 2022",
            description: "Synthesised complex clinical trial data and mechanism-of-action \
studies for healthcare professionals. Evaluated peer-reviewed medical literature and genomic \
studies to provide technical insights on drug efficacy. Served as a technical liaison, \
translating biological findings into therapeutic insights for clinical practice.",
        },
        Experience {
            role: "Production Supervisor",
            org: "Blue Nile Pharmaceutical Factory",
            period: "2019 - 2021",
            description: "Engineered a 4x increase in manufacturing throughput by optimising \
production cycles and workflows. Led cross-functional teams to troubleshoot complex \
bottlenecks during high-volume scaling. Managed end-to-end manufacturing processes in strict \
adherence to GMP standards.",
        },
        Experience {
            role: "Medical Representative",
            org: "Aurobindo Pharma and Bioderma",
            period: "2016 - 2018",
            description: "Communicated technical product features and clinical benefits to \
healthcare professionals through scientific presentations. Interpreted multidimensional \
clinical studies to resolve complex medical inquiries regarding therapeutic data. Conducted \
systematic analysis of healthcare data to identify emerging clinical trends.",
        },
        Experience {
            role: "Clinical Pharmacist",
            org: "Sudan Military Hospital & Wenji Pharmacy",
            period: "2015 - 2016",
            description: "Processed and dispensed prescription medications with 100% \
accuracy, verifying dosages and interactions. Provided clinical counselling to patients on \
medication use and side effect management to ensure adherence. Monitored pharmaceutical \
inventory and controlled substances in coordination with medical professionals.",
        },
    ],
    education: &[Education {
        degree: "Bachelor of science: Pharmacy",
        school: "NATIONAL RIBAT UNIVERSITY",
        location: "Khartoum, Sudan",
        period: "2010 - 2015",
        details: "Pharmacology, Clinical Pharmacology, Biochemistry, Pharmacognosy, \
Pharmaceutics, Pharmaceutical Management, Microbiology, Organic Chemistry and Analytical \
Chemistry.",
    }],
    certificates: &[
        ItemGroup {
            title: "Bioinformatics & Computational Science",
            items: &[
                "Bioinformatics for Biologists: Linux, BASH Scripting, and R",
                "Kaggle Python Certification: Data science syntax and structures",
                "Introduction to Bioinformatics: Genomic analysis and sequence processing",
                "Google Cloud Digital Leader (Badge): Foundational cloud transformation, \
infrastructure, and AI/ML innovation",
                "National Bioinformatics Infrastructure Sweden (NBIS): Workshops and Training",
            ],
        },
        ItemGroup {
            title: "Pharmaceutical Operations & Strategy",
            items: &[
                "Drug Information Resources: Evidence-based research and clinical databases",
                "Total Quality Management: Process optimisation and quality standards",
                "Basic Pharmaceutical Marketing: Strategic communication and product positioning",
            ],
        },
    ],
    additional: AdditionalInfo {
        languages: "Arabic, English",
        location: "Riyadh, KSA",
        visa: "Transferable Iqama | Valid Driver license",
    },
    contact: Contact {
        email: "Mujtababarsi@mail.com",
        github: "https://github.com/mujtababarsi",
    },
};

impl Profile {
    /// Resolve a project by 1-based index or by case-insensitive title fragment.
    pub fn find_project(&self, selector: &str) -> Result<&'static Project> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(anyhow!("project selector must not be empty"));
        }

        if let Ok(idx) = selector.parse::<usize>() {
            return idx
                .checked_sub(1)
                .and_then(|i| self.projects.get(i))
                .ok_or_else(|| {
                    anyhow!(
                        "no project #{idx}; choose 1 to {}",
                        self.projects.len()
                    )
                });
        }

        let needle = selector.to_lowercase();
        let matches: Vec<&'static Project> = self
            .projects
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .collect();

        match matches.as_slice() {
            [one] => Ok(*one),
            [] => Err(anyhow!("no project title matches {selector:?}")),
            many => Err(anyhow!(
                "{selector:?} matches {} projects: {}",
                many.len(),
                many.iter().map(|p| p.title).collect::<Vec<_>>().join("; ")
            )),
        }
    }

    /// `"<role> at <org>"` for every experience entry, newest first.
    pub fn career_summary(&self) -> String {
        self.experience
            .iter()
            .map(|e| format!("{} at {}", e.role, e.org))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Every skill item across all categories, in declaration order.
    pub fn flat_skills(&self) -> String {
        self.skills
            .iter()
            .flat_map(|s| s.items.iter().copied())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn render_projects(profile: &Profile) -> String {
    let mut out = String::new();
    for (idx, p) in profile.projects.iter().enumerate() {
        let _ = writeln!(out, "{:>2}) {}", idx + 1, p.title.bold());
        let _ = writeln!(out, "    Tools: {}", p.tools);
        let _ = writeln!(out, "    Tags:  {}", p.tags.join(", "));
    }
    out
}

/// Plain-text rendering of the whole portfolio, section by section.
pub fn render_profile(profile: &Profile, full_summary: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", profile.name.bold());
    let _ = writeln!(out, "{}\n", profile.headline);
    let summary = if full_summary {
        profile.summary_full
    } else {
        profile.summary_brief
    };
    let _ = writeln!(out, "{summary}\n");

    push_heading(&mut out, "Areas of Expertise");
    push_groups(&mut out, profile.expertise);

    push_heading(&mut out, "Technical Skills");
    push_groups(&mut out, profile.skills);

    push_heading(&mut out, "Projects");
    for p in profile.projects {
        let _ = writeln!(out, "{}", p.title.bold());
        let _ = writeln!(out, "  {}", p.tools.italic());
        let _ = writeln!(out, "  {}", p.description);
        let _ = writeln!(out, "  [{}]\n", p.tags.join("] ["));
    }

    push_heading(&mut out, "Experience");
    for e in profile.experience {
        let _ = writeln!(out, "{} | {} ({})", e.role.bold(), e.org, e.period);
        let _ = writeln!(out, "  {}\n", e.description);
    }

    push_heading(&mut out, "Education");
    for ed in profile.education {
        let _ = writeln!(out, "{} ({})", ed.degree.bold(), ed.period);
        let _ = writeln!(out, "  {}, {}", ed.school, ed.location);
        let _ = writeln!(out, "  {}\n", ed.details);
    }

    push_heading(&mut out, "Certifications");
    push_groups(&mut out, profile.certificates);

    push_heading(&mut out, "Additional Information");
    let _ = writeln!(out, "Languages: {}", profile.additional.languages);
    let _ = writeln!(out, "Location:  {}", profile.additional.location);
    let _ = writeln!(out, "Status:    {}", profile.additional.visa);
    out.push('\n');

    push_heading(&mut out, "Contact");
    let _ = writeln!(out, "Email:  {}", profile.contact.email);
    let _ = writeln!(out, "GitHub: {}", profile.contact.github);

    out
}

fn push_heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", format!("== {title} ==").cyan().bold());
}

fn push_groups(out: &mut String, groups: &[ItemGroup]) {
    for g in groups {
        let _ = writeln!(out, "{}", g.title.bold());
        for item in g.items {
            let _ = writeln!(out, "  - {item}");
        }
    }
    out.push('\n');
}
