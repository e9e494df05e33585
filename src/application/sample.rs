//! Default candidate profile and sample payloads.

use crate::application::data::DataError;
use crate::application::types::{ApplicationPayload, CandidateProfile, Experience};

const WHY_HIRE_ME: &str = "I bring a unique combination of technical expertise and \
leadership skills. My experience in building scalable systems, combined with my passion for \
clean code and collaborative development, makes me an ideal candidate. I'm committed to \
continuous learning and always strive to deliver high-quality solutions that exceed \
expectations.";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Profile attached to applications built from command-line arguments.
pub fn default_profile() -> CandidateProfile {
    CandidateProfile {
        personal_attributes: strings(&[
            "Problem-solver",
            "Team player",
            "Fast learner",
            "Detail-oriented",
            "Passionate about technology",
        ]),
        experience: Experience {
            years_of_experience: 5,
            previous_roles: strings(&[
                "Senior Software Engineer",
                "Full Stack Developer",
                "Backend Developer",
            ]),
            key_projects: strings(&[
                "Built scalable microservices handling 1M+ requests/day",
                "Developed real-time data processing pipeline",
                "Led team of 4 developers in agile environment",
            ]),
            languages: strings(&["Rust", "Go", "Python", "TypeScript", "SQL"]),
            frameworks: strings(&["Tokio", "Axum", "React", "Django"]),
        },
        why_hire_me: WHY_HIRE_ME.to_string(),
        technical_skills: strings(&[
            "Microservices Architecture",
            "Cloud Computing (AWS, GCP)",
            "Docker & Kubernetes",
            "CI/CD Pipelines",
            "Database Design (SQL & NoSQL)",
            "API Design & Development",
            "Test-Driven Development",
        ]),
        education: "Bachelor's in Computer Science".to_string(),
        location: "Australia".to_string(),
        availability: "Immediate".to_string(),
    }
}

/// Richer profile written by `--generate-data-json`.
fn sample_profile() -> CandidateProfile {
    let mut profile = default_profile();
    profile.personal_attributes.push("Strong communication skills".to_string());
    profile
        .experience
        .key_projects
        .push("Migrated legacy system to cloud infrastructure".to_string());
    profile.experience.languages.push("Java".to_string());
    profile.experience.frameworks.push("Spring Boot".to_string());
    profile.technical_skills.push("Agile/Scrum Methodologies".to_string());
    profile
}

/// Realistic sample application used for `data.json` generation.
pub fn sample_application() -> ApplicationPayload {
    ApplicationPayload::new("John Doe", "john.doe@example.com", "Software Engineer")
        .with_final_attempt(Some(false))
        .with_extra_information(sample_profile().into_extra_information())
}

/// Build a payload from positional arguments `<name> <email> <job_title> [final_attempt]`.
///
/// `final_attempt` is only set when the fourth argument is exactly `"true"`.
pub fn from_args(args: &[String]) -> Result<ApplicationPayload, DataError> {
    let [name, email, job_title, rest @ ..] = args else {
        return Err(DataError::InsufficientArguments);
    };

    let final_attempt = match rest.first() {
        Some(flag) if flag == "true" => Some(true),
        _ => None,
    };

    Ok(ApplicationPayload::new(name.as_str(), email.as_str(), job_title.as_str())
        .with_final_attempt(final_attempt)
        .with_extra_information(default_profile().into_extra_information()))
}
