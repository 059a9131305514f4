//! Challenge solutions.
//!
//! A solution is tagged by `kind` (`type` in older challenge files):
//!
//! ```json
//! {"kind": "selector", "selector": "plate > apple"}
//! {"kind": "style", "selector": ".box", "properties": {"width": "100px"}}
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What a challenge expects of the learner's CSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSolution", into = "RawSolution")]
pub enum Solution {
    /// The learner must style exactly the elements matched by a selector.
    Selector(SelectorSolution),
    /// Elements matched by a selector must have specific computed values.
    Style(StyleSolution),
    /// A kind this engine cannot check. Always fails validation.
    Unsupported { kind: String },
}

impl Solution {
    /// Create a selector solution.
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector(SelectorSolution {
            selector: selector.into(),
        })
    }

    /// Create a style solution.
    pub fn style<K, V>(selector: impl Into<String>, properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Style(StyleSolution {
            selector: selector.into(),
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        })
    }

    /// The solution kind as written in challenge data.
    pub fn kind(&self) -> &str {
        match self {
            Solution::Selector(_) => "selector",
            Solution::Style(_) => "style",
            Solution::Unsupported { kind } => kind,
        }
    }
}

/// Exactly the targeted elements, and no others, carry the sentinel value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSolution {
    pub selector: String,
}

/// Every matched element has every property equivalent to its expected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSolution {
    pub selector: String,
    /// Property name and expected value, in authored order.
    pub properties: Vec<(String, String)>,
}

#[derive(Serialize, Deserialize)]
struct RawSolution {
    #[serde(alias = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<PropertyList>,
}

impl TryFrom<RawSolution> for Solution {
    type Error = String;

    fn try_from(raw: RawSolution) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "selector" => {
                let selector = raw.selector.ok_or("selector solution without a selector")?;
                Ok(Solution::Selector(SelectorSolution { selector }))
            }
            "style" => {
                let selector = raw.selector.ok_or("style solution without a selector")?;
                let properties = raw.properties.ok_or("style solution without properties")?;
                Ok(Solution::Style(StyleSolution {
                    selector,
                    properties: properties.0,
                }))
            }
            _ => Ok(Solution::Unsupported { kind: raw.kind }),
        }
    }
}

impl From<Solution> for RawSolution {
    fn from(solution: Solution) -> Self {
        match solution {
            Solution::Selector(s) => RawSolution {
                kind: "selector".to_string(),
                selector: Some(s.selector),
                properties: None,
            },
            Solution::Style(s) => RawSolution {
                kind: "style".to_string(),
                selector: Some(s.selector),
                properties: Some(PropertyList(s.properties)),
            },
            Solution::Unsupported { kind } => RawSolution {
                kind,
                selector: None,
                properties: None,
            },
        }
    }
}

/// A JSON object read as an ordered list of pairs.
struct PropertyList(Vec<(String, String)>);

impl<'de> Deserialize<'de> for PropertyList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertyVisitor;

        impl<'de> Visitor<'de> for PropertyVisitor {
            type Value = PropertyList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property names to expected values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PropertyList, A::Error> {
                let mut properties = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, String>()? {
                    properties.push((name, value));
                }
                Ok(PropertyList(properties))
            }
        }

        deserializer.deserialize_map(PropertyVisitor)
    }
}

impl Serialize for PropertyList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_solution() {
        let solution: Solution =
            serde_json::from_str(r#"{"kind": "selector", "selector": "plate > apple"}"#).unwrap();
        assert_eq!(solution, Solution::selector("plate > apple"));
        assert_eq!(solution.kind(), "selector");
    }

    #[test]
    fn type_is_accepted_for_kind() {
        let solution: Solution =
            serde_json::from_str(r#"{"type": "style", "selector": ".box", "properties": {"width": "100px"}}"#)
                .unwrap();
        assert_eq!(solution, Solution::style(".box", [("width", "100px")]));
    }

    #[test]
    fn property_order_is_preserved() {
        let solution: Solution = serde_json::from_str(
            r#"{"kind": "style", "selector": "div", "properties": {"z-index": "1", "align-items": "center", "margin": "0"}}"#,
        )
        .unwrap();

        let Solution::Style(style) = solution else {
            panic!("expected a style solution");
        };
        let names: Vec<_> = style.properties.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["z-index", "align-items", "margin"]);
    }

    #[test]
    fn unknown_kinds_are_kept() {
        let solution: Solution = serde_json::from_str(r#"{"kind": "animation", "selector": "div"}"#).unwrap();
        assert_eq!(
            solution,
            Solution::Unsupported {
                kind: "animation".to_string()
            }
        );
    }

    #[test]
    fn missing_fields_are_errors() {
        assert!(serde_json::from_str::<Solution>(r#"{"kind": "selector"}"#).is_err());
        assert!(serde_json::from_str::<Solution>(r#"{"kind": "style", "selector": "p"}"#).is_err());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(Solution::style(".box", [("width", "1px"), ("color", "red")])).unwrap();
        assert_eq!(json["kind"], "style");
        assert_eq!(json["properties"]["color"], "red");
    }
}
