use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

/// An epigram as returned by the content API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Epigram {
    pub id: u64,
    pub content: String,
    pub author: String,
    // The API occasionally omits or nulls the tag list
    #[serde(default, deserialize_with = "tags_or_empty")]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub reference_url: Option<String>,
    #[serde(default)]
    pub reference_title: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub writer_id: Option<u64>,
}

impl Epigram {
    pub fn new(id: u64, content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            author: author.into(),
            tags: Vec::new(),
            reference_url: None,
            reference_title: None,
            like_count: 0,
            writer_id: None,
        }
    }

    pub fn with_tags<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Tag {
                id: i as u64 + 1,
                name: name.into(),
            })
            .collect();
        self
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }
}

fn tags_or_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Tag>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// A page of epigrams from `GET /epigrams`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpigramList {
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub next_cursor: Option<u64>,
    #[serde(default)]
    pub list: Vec<Epigram>,
}

/// The display shape every list view renders: tags flattened to their names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpigramCard {
    pub id: u64,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
}

impl From<&Epigram> for EpigramCard {
    fn from(epigram: &Epigram) -> Self {
        Self {
            id: epigram.id,
            content: epigram.content.clone(),
            author: epigram.author.clone(),
            tags: epigram.tag_names().map(str::to_string).collect(),
        }
    }
}

impl From<Epigram> for EpigramCard {
    fn from(epigram: Epigram) -> Self {
        Self {
            id: epigram.id,
            content: epigram.content,
            author: epigram.author,
            tags: epigram.tags.into_iter().map(|t| t.name).collect(),
        }
    }
}

/// Signed-in user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub email: String,
    pub nickname: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub nickname: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEpigramRequest {
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_item() {
        let json = r#"{
            "id": 7,
            "content": "오랫동안 꿈을 그리는 사람은 마침내 그 꿈을 닮아 간다.",
            "author": "앙드레 말로",
            "tags": [{"id": 1, "name": "나아가야할때"}, {"id": 2, "name": "꿈"}],
            "referenceUrl": "https://example.com",
            "likeCount": 3,
            "writerId": 42
        }"#;
        let epigram: Epigram = serde_json::from_str(json).unwrap();
        assert_eq!(epigram.id, 7);
        assert_eq!(epigram.tags.len(), 2);
        assert_eq!(epigram.like_count, 3);
        assert_eq!(epigram.writer_id, Some(42));
        assert_eq!(epigram.reference_title, None);
    }

    #[test]
    fn missing_or_null_tags_become_empty() {
        let missing: Epigram =
            serde_json::from_str(r#"{"id": 1, "content": "a", "author": "b"}"#).unwrap();
        assert!(missing.tags.is_empty());

        let null: Epigram =
            serde_json::from_str(r#"{"id": 1, "content": "a", "author": "b", "tags": null}"#)
                .unwrap();
        assert!(null.tags.is_empty());
    }

    #[test]
    fn card_flattens_tag_names() {
        let epigram = Epigram::new(3, "abc", "someone").with_tags(["x", "y"]);
        let card = EpigramCard::from(&epigram);
        assert_eq!(card.tags, vec!["x", "y"]);
        assert_eq!(card.id, 3);
    }

    #[test]
    fn new_epigram_request_omits_empty_reference() {
        let request = NewEpigramRequest {
            content: "c".into(),
            author: "a".into(),
            tags: vec!["t".into()],
            reference_url: None,
            reference_title: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("referenceUrl").is_none());
        assert_eq!(json["tags"][0], "t");
    }

    #[test]
    fn list_defaults_when_fields_missing() {
        let list: EpigramList = serde_json::from_str(r#"{"list": []}"#).unwrap();
        assert_eq!(list.total_count, 0);
        assert!(list.next_cursor.is_none());
    }
}
