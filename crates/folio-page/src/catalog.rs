//! Read-only table of the articles the overlay can show.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use folio_types::error::{FolioError, Result};

/// A PDF copy of an article offered for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfAsset {
    /// Path of the file next to the page.
    pub path: String,
    /// Name the browser saves it under.
    pub filename: String,
}

/// One article: title, trusted body markup, and ordered tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    pub body_markup: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub pdf: Option<PdfAsset>,
}

/// Immutable lookup table keyed by article id.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    records: Vec<ArticleRecord>,
    index: HashMap<String, usize>,
}

impl ContentCatalog {
    /// Build a catalog, rejecting empty or duplicate ids.
    pub fn from_records(records: Vec<ArticleRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if record.id.is_empty() {
                return Err(FolioError::Catalog(format!("record {i} has an empty id")));
            }
            if index.insert(record.id.clone(), i).is_some() {
                return Err(FolioError::Catalog(format!("duplicate id {}", record.id)));
            }
        }
        Ok(Self { records, index })
    }

    /// The articles shipped with the page.
    pub fn builtin() -> Self {
        let records = BUILTIN
            .iter()
            .map(|a| ArticleRecord {
                id: a.id.to_string(),
                title: a.title.to_string(),
                body_markup: a.body.to_string(),
                tags: a.tags.iter().map(|t| t.to_string()).collect(),
                pdf: Some(PdfAsset {
                    path: a.pdf_path.to_string(),
                    filename: a.pdf_name.to_string(),
                }),
            })
            .collect();
        let mut index = HashMap::new();
        for (i, a) in BUILTIN.iter().enumerate() {
            index.insert(a.id.to_string(), i);
        }
        Self { records, index }
    }

    pub fn get(&self, id: &str) -> Option<&ArticleRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Ids in table order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// -----------------------------------------------------------------------
// Built-in articles
// -----------------------------------------------------------------------

struct BuiltinArticle {
    id: &'static str,
    title: &'static str,
    body: &'static str,
    tags: &'static [&'static str],
    pdf_path: &'static str,
    pdf_name: &'static str,
}

const BUILTIN: &[BuiltinArticle] = &[
    BuiltinArticle {
        id: "article1",
        title: "Landmark Supreme Court Judgments in India",
        body: "<p>The Supreme Court of India has shaped the constitutional order through a \
               line of decisions that expanded the reach of fundamental rights.</p>\
               <h3>Kesavananda Bharati v. State of Kerala (1973)</h3>\
               <p>Established the basic structure doctrine, holding that Parliament may amend \
               the Constitution but cannot alter its essential features.</p>\
               <h3>Maneka Gandhi v. Union of India (1978)</h3>\
               <p>Read Articles 14, 19 and 21 together, requiring any procedure depriving a \
               person of liberty to be just, fair and reasonable.</p>\
               <h3>Justice K.S. Puttaswamy v. Union of India (2017)</h3>\
               <p>Recognised privacy as a fundamental right protected under Article 21.</p>",
        tags: &["Constitutional Law", "Supreme Court", "Case Analysis"],
        pdf_path: "Khushi_Goyal_Landmark_supreme_Court_judgments_in_India.pdf",
        pdf_name: "Landmark_Supreme_Court_Judgments.pdf",
    },
    BuiltinArticle {
        id: "article2",
        title: "Legal Aid in India",
        body: "<p>Article 39A directs the State to secure equal justice and free legal aid, so \
               that no citizen is denied justice by reason of economic or other disabilities.</p>\
               <h3>Statutory framework</h3>\
               <p>The Legal Services Authorities Act, 1987 created NALSA, State and District \
               authorities, and the Lok Adalat system for inexpensive dispute resolution.</p>\
               <h3>Gaps in access</h3>\
               <p>Awareness of entitlement remains low, panel lawyers are under-resourced, and \
               undertrial prisoners frequently go unrepresented.</p>",
        tags: &["Human Rights", "Access to Justice", "Legal Aid"],
        pdf_path: "Khushi_Goyal_LegalAid_in_India.pdf",
        pdf_name: "Legal_Aid_in_India.pdf",
    },
    BuiltinArticle {
        id: "article3",
        title: "Analysis of Fundamental Rights in India",
        body: "<p>Part III of the Constitution guarantees rights enforceable against the State \
               and, through Article 32, directly before the Supreme Court.</p>\
               <h3>Equality and freedom</h3>\
               <p>Articles 14 to 18 secure equality before law; Article 19 protects six \
               freedoms subject to reasonable restrictions.</p>\
               <h3>Life and personal liberty</h3>\
               <p>Judicial interpretation of Article 21 has grown to include dignity, \
               livelihood, health, education and a clean environment.</p>",
        tags: &["Constitutional Law", "Fundamental Rights", "Part III"],
        pdf_path: "khushi_goyal_Analysis_of_Fundamental_Rights_in_India.pdf",
        pdf_name: "Analysis_of_Fundamental_Rights_in_India.pdf",
    },
    BuiltinArticle {
        id: "article4",
        title: "Legal Framework for Environment in India",
        body: "<p>Articles 48A and 51A(g) place environmental protection among the duties of \
               the State and of every citizen.</p>\
               <h3>Legislation</h3>\
               <p>The Water Act 1974, the Air Act 1981 and the Environment (Protection) Act \
               1986 form the statutory core, with the National Green Tribunal adjudicating \
               disputes since 2010.</p>\
               <h3>Judicial activism</h3>\
               <p>Public interest litigation introduced the polluter pays and precautionary \
               principles into Indian law.</p>",
        tags: &["Environmental Law", "Sustainability", "Public Interest Litigation"],
        pdf_path: "khushi_goyal_legal_framework_for_enviroment_in_india.pdf",
        pdf_name: "Legal_Framework_for_Environment_in_India.pdf",
    },
];
