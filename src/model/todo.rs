//! Task 数据模型（与服务端 JSON 对应）

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 任务优先级，High > Medium > Low
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "baja")]
    Low,
    #[default]
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
}

impl Priority {
    /// 显示名称
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// 所有优先级（从高到低）
    pub fn all() -> &'static [Priority] {
        &[Priority::High, Priority::Medium, Priority::Low]
    }

    /// High -> Medium -> Low -> High
    pub fn next(&self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }

    /// Low -> Medium -> High -> Low
    pub fn prev(&self) -> Self {
        match self {
            Priority::High => Priority::Low,
            Priority::Medium => Priority::High,
            Priority::Low => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" | "alta" => Ok(Priority::High),
            "medium" | "m" | "media" => Ok(Priority::Medium),
            "low" | "l" | "baja" => Ok(Priority::Low),
            other => Err(format!(
                "unknown priority '{}' (expected high, medium or low)",
                other
            )),
        }
    }
}

/// 服务端返回的任务
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(deserialize_with = "de_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "de_opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// POST /todos/ 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl CreateTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
        }
    }
}

/// PUT /todos/{id} 请求体，只序列化出现的字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }
}

/// 新建任务表单（草稿）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl Draft {
    /// 转成请求体；标题为空时返回 None
    pub fn to_request(&self) -> Option<CreateTodo> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let description = self.description.trim();
        Some(CreateTodo {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            priority: Some(self.priority),
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// RFC 3339, or a naive ISO timestamp taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
}

fn de_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_priority_wire_values() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"alta\"");
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"media\"");
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"baja\"");
        let p: Priority = serde_json::from_str("\"baja\"").unwrap();
        assert_eq!(p, Priority::Low);
    }

    #[test]
    fn test_priority_order_and_cycle() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Priority::High.next(), Priority::Medium);
        assert_eq!(Priority::Low.next(), Priority::High);
        assert_eq!(Priority::High.prev(), Priority::Low);
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("m".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("baja".parse::<Priority>(), Ok(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_todo_deserialize_naive_timestamp() {
        let json = r#"{
            "id": "65f1",
            "title": "Buy milk",
            "description": null,
            "priority": "alta",
            "completed": false,
            "created_at": "2024-03-13T10:15:30.123456",
            "user_id": "u1"
        }"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.description, "");
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(todo.created_at.year(), 2024);
        assert_eq!(todo.created_at.hour(), 10);
        assert!(todo.updated_at.is_none());
    }

    #[test]
    fn test_todo_deserialize_rfc3339() {
        let json = r#"{
            "id": "1",
            "title": "t",
            "description": "d",
            "priority": "media",
            "completed": true,
            "created_at": "2024-03-13T10:15:30Z",
            "updated_at": "2024-03-14T08:00:00+02:00"
        }"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert!(todo.completed);
        assert_eq!(todo.updated_at.unwrap().hour(), 6);
    }

    #[test]
    fn test_update_only_serializes_present_fields() {
        let body = serde_json::to_value(UpdateTodo::completed(true)).unwrap();
        assert_eq!(body, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn test_draft_to_request() {
        let draft = Draft {
            title: "  Buy milk ".to_string(),
            ..Draft::default()
        };
        let req = draft.to_request().unwrap();
        assert_eq!(req.title, "Buy milk");
        assert_eq!(req.description, None);
        assert_eq!(req.priority, Some(Priority::Medium));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "title": "Buy milk", "priority": "media" })
        );

        let empty = Draft {
            title: "   ".to_string(),
            ..Draft::default()
        };
        assert!(empty.to_request().is_none());
    }
}
