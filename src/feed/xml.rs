// src/feed/xml.rs

use crate::errors::{MitsError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Key holding the text of an element that also has attributes or children.
pub const CONTENT_KEY: &str = "__content__";

/// An element that has been opened but not yet closed.
struct Frame {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let mut fields = Map::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| MitsError::XmlParse(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| MitsError::XmlParse(e.to_string()))?;
            insert_child(&mut fields, key, Value::String(value.into_owned()));
        }

        Ok(Frame {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            fields,
            text: String::new(),
        })
    }

    /// Collapses the element into the value stored under its name.
    fn close(self) -> (String, Value) {
        let text = self.text.trim();

        let value = if self.fields.is_empty() {
            if text.is_empty() {
                Value::Null
            } else {
                Value::String(text.to_string())
            }
        } else {
            let mut fields = self.fields;
            if !text.is_empty() {
                fields.insert(CONTENT_KEY.to_string(), Value::String(text.to_string()));
            }
            Value::Object(fields)
        };

        (self.name, value)
    }
}

/// Stores `value` under `key`; a repeated key turns into a sequence.
fn insert_child(fields: &mut Map<String, Value>, key: String, value: Value) {
    match fields.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(key, value);
        }
    }
}

/// Converts an XML document into a Value tree keyed by element names.
///
/// The result is a single-key map holding the root element. Attributes and
/// child elements become keys of their element's map, repeated siblings
/// become a sequence, text-only elements become strings and empty elements
/// become null. No type casting is applied.
pub fn from_xml(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    let mut finish = |frame: Frame, stack: &mut Vec<Frame>| -> Result<()> {
        let (name, value) = frame.close();
        match stack.last_mut() {
            Some(parent) => insert_child(&mut parent.fields, name, value),
            None if root.is_none() => root = Some((name, value)),
            None => {
                return Err(MitsError::XmlParse(format!(
                    "multiple root elements, second is <{name}>"
                )))
            }
        }
        Ok(())
    };

    loop {
        let event = reader.read_event().map_err(|e| {
            MitsError::XmlParse(format!("at byte {}: {e}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let frame = Frame::open(&start)?;
                finish(frame, &mut stack)?;
            }
            Event::End(_) => match stack.pop() {
                Some(frame) => finish(frame, &mut stack)?,
                None => return Err(MitsError::XmlParse("unexpected closing tag".into())),
            },
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| MitsError::XmlParse(e.to_string()))?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(MitsError::XmlParse(format!(
            "document ended inside <{}>",
            open.name
        )));
    }

    let (name, value) =
        root.ok_or_else(|| MitsError::XmlParse("document has no root element".into()))?;

    let mut doc = Map::new();
    doc.insert(name, value);
    Ok(Value::Object(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn elements_become_nested_maps() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <PhysicalProperty>
                <Property>
                    <Identification>
                        <MarketingName>Ash Grove</MarketingName>
                    </Identification>
                </Property>
            </PhysicalProperty>"#;

        assert_eq!(
            from_xml(xml).unwrap(),
            json!({
                "PhysicalProperty": {
                    "Property": {
                        "Identification": { "MarketingName": "Ash Grove" }
                    }
                }
            })
        );
    }

    #[test]
    fn repeated_siblings_become_a_sequence() {
        let xml = "<Root><File>a</File><File>b</File><File>c</File><Other/></Root>";

        assert_eq!(
            from_xml(xml).unwrap(),
            json!({ "Root": { "File": ["a", "b", "c"], "Other": null } })
        );
    }

    #[test]
    fn attributes_and_text_share_the_map() {
        let xml = r#"<Root><Amenity AmenityType="Pool" Count="2">Heated &amp; covered</Amenity></Root>"#;

        assert_eq!(
            from_xml(xml).unwrap(),
            json!({
                "Root": {
                    "Amenity": {
                        "AmenityType": "Pool",
                        "Count": "2",
                        "__content__": "Heated & covered"
                    }
                }
            })
        );
    }

    #[test]
    fn empty_element_with_attributes_keeps_them() {
        let xml = r#"<Root><File Src="a.jpg"/></Root>"#;
        assert_eq!(
            from_xml(xml).unwrap(),
            json!({ "Root": { "File": { "Src": "a.jpg" } } })
        );
    }

    #[test]
    fn cdata_is_text() {
        let xml = "<Root><Description><![CDATA[<b>Bright</b> units]]></Description></Root>";
        assert_eq!(
            from_xml(xml).unwrap(),
            json!({ "Root": { "Description": "<b>Bright</b> units" } })
        );
    }

    #[test]
    fn malformed_documents_fail() {
        for xml in ["", "<Root><A></B></Root>", "<Root><A>", "<A/><B/>"] {
            let err = from_xml(xml).unwrap_err();
            assert!(matches!(err, MitsError::XmlParse(_)), "{xml}: {err}");
        }
    }
}
