use serde::Deserialize;

/// One post delivered by the filtered stream.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamEvent {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default, rename = "referenced_tweets")]
    pub referenced: Vec<ReferencedPost>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferencedPost {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}
