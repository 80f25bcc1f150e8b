//! Source record schemas and their rendering into retrieval documents.
//!
//! Structured portal records are flattened into labeled text blocks before
//! indexing; the labels give the generator recognizable fields to quote and
//! give keyword search literal terms to match. Missing optional fields
//! render as "N/A" rather than being dropped, keeping the block shape
//! uniform across records.

use rozgar_core::types::{ContentType, Document};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawRecord {
    Job(JobRecord),
    Faq(FaqRecord),
    Scheme(SchemeRecord),
    Training(TrainingRecord),
    News(NewsRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Government,
    #[default]
    Private,
}

#[derive(Debug, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub name_of_post: String,
    pub name_of_employer: Option<String>,
    pub place_of_posting: Option<String>,
    pub required_qualification: Option<String>,
    #[serde(default)]
    pub sector: Sector,
    pub last_apply_date: Option<String>,
    pub maximum_applicable_age: Option<String>,
    pub notification_link: Option<String>,
    pub salary: Option<String>,
    pub vacancies: Option<String>,
    pub apply_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FaqRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct SchemeRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub benefits: Option<String>,
    pub eligibility: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrainingRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub eligibility: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsRecord {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub date: Option<String>,
}

fn or_na(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("N/A")
}

pub fn render(record: RawRecord) -> Document {
    match record {
        RawRecord::Job(job) => render_job(job),
        RawRecord::Faq(faq) => {
            let content = format!("Q: {}\nA: {}", faq.question, faq.answer);
            Document::new(faq.id.clone(), content, ContentType::Faq)
                .with_meta("source", "faqs")
                .with_meta("record_id", faq.id)
        }
        RawRecord::Scheme(scheme) => {
            let content = format!(
                "Scheme: {}\nDescription: {}\nBenefits: {}\nEligibility: {}",
                scheme.name,
                or_na(&scheme.description),
                or_na(&scheme.benefits),
                or_na(&scheme.eligibility),
            );
            Document::new(scheme.id.clone(), content, ContentType::Scheme)
                .with_meta("source", "schemes")
                .with_meta("record_id", scheme.id)
        }
        RawRecord::Training(training) => {
            let content = format!(
                "Training: {}\nDescription: {}\nDuration: {}\nEligibility: {}",
                training.name,
                or_na(&training.description),
                or_na(&training.duration),
                or_na(&training.eligibility),
            );
            Document::new(training.id.clone(), content, ContentType::Training)
                .with_meta("source", "training_programs")
                .with_meta("record_id", training.id)
        }
        RawRecord::News(news) => {
            let content = format!(
                "News: {}\nContent: {}\nDate: {}",
                news.title,
                or_na(&news.content),
                or_na(&news.date),
            );
            Document::new(news.id.clone(), content, ContentType::News)
                .with_meta("source", "news_updates")
                .with_meta("record_id", news.id)
        }
    }
}

fn render_job(job: JobRecord) -> Document {
    let mut content = format!(
        "JOB_TYPE: {}\nROLE: {}\nORGANIZATION: {}\nLOCATION: {}\nQUALIFICATION: {}\n",
        match job.sector {
            Sector::Government => "Government",
            Sector::Private => "Private Sector",
        },
        job.name_of_post,
        or_na(&job.name_of_employer),
        or_na(&job.place_of_posting),
        or_na(&job.required_qualification),
    );
    match job.sector {
        Sector::Government => {
            content.push_str(&format!(
                "DEADLINE: {}\nAGE LIMIT: {}\nOFFICIAL NOTIFICATION: {}\n",
                or_na(&job.last_apply_date),
                or_na(&job.maximum_applicable_age),
                or_na(&job.notification_link),
            ));
        }
        Sector::Private => {
            content.push_str(&format!(
                "SALARY: {}\nVACANCIES: {}\n",
                or_na(&job.salary),
                or_na(&job.vacancies),
            ));
        }
    }
    content.push_str(&format!("APPLY LINK: {}\n", or_na(&job.apply_link)));

    let source = match job.sector {
        Sector::Government => "jobs_govt",
        Sector::Private => "jobs_private",
    };
    Document::new(job.id.clone(), content, ContentType::Job)
        .with_meta("source", source)
        .with_meta("record_id", job.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_json(sector: &str) -> String {
        format!(
            r#"{{
                "kind": "job",
                "id": "g-1",
                "name_of_post": "Junior Engineer",
                "name_of_employer": "PSPCL",
                "place_of_posting": "Patiala",
                "required_qualification": "B.Tech",
                "sector": "{sector}",
                "last_apply_date": "2025-09-30",
                "maximum_applicable_age": "37",
                "salary": "25000",
                "vacancies": "12"
            }}"#
        )
    }

    #[test]
    fn government_jobs_render_deadline_block() {
        let record: RawRecord = serde_json::from_str(&job_json("government")).unwrap();
        let doc = render(record);
        assert_eq!(doc.content_type, ContentType::Job);
        assert!(doc.content.contains("JOB_TYPE: Government"));
        assert!(doc.content.contains("DEADLINE: 2025-09-30"));
        assert!(doc.content.contains("AGE LIMIT: 37"));
        assert!(!doc.content.contains("SALARY"));
        assert_eq!(doc.metadata.get("source").map(String::as_str), Some("jobs_govt"));
    }

    #[test]
    fn private_jobs_render_salary_block() {
        let record: RawRecord = serde_json::from_str(&job_json("private")).unwrap();
        let doc = render(record);
        assert!(doc.content.contains("JOB_TYPE: Private Sector"));
        assert!(doc.content.contains("SALARY: 25000"));
        assert!(doc.content.contains("VACANCIES: 12"));
        assert!(!doc.content.contains("DEADLINE"));
    }

    #[test]
    fn missing_fields_render_as_na() {
        let record: RawRecord = serde_json::from_str(
            r#"{"kind": "job", "id": "p-2", "name_of_post": "Helper"}"#,
        )
        .unwrap();
        let doc = render(record);
        assert!(doc.content.contains("ORGANIZATION: N/A"));
        assert!(doc.content.contains("APPLY LINK: N/A"));
    }

    #[test]
    fn faqs_render_question_answer_pairs() {
        let record: RawRecord = serde_json::from_str(
            r#"{"kind": "faq", "id": "f-1", "question": "How do I register?", "answer": "Visit the portal."}"#,
        )
        .unwrap();
        let doc = render(record);
        assert_eq!(doc.content, "Q: How do I register?\nA: Visit the portal.");
        assert_eq!(doc.content_type, ContentType::Faq);
    }

    #[test]
    fn schemes_render_labeled_fields() {
        let record: RawRecord = serde_json::from_str(
            r#"{"kind": "scheme", "id": "s-1", "name": "Self Employment Scheme",
                "description": "Loans for new ventures", "benefits": "Subsidized interest",
                "eligibility": "Age 18-45"}"#,
        )
        .unwrap();
        let doc = render(record);
        assert!(doc.content.starts_with("Scheme: Self Employment Scheme"));
        assert!(doc.content.contains("Benefits: Subsidized interest"));
        assert_eq!(doc.content_type, ContentType::Scheme);
    }
}
