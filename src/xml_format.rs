//! XML document format for stored profiles
//!
//! A store is a single `<aliases>` document holding one `<alias>` element per
//! profile record:
//!
//! ```xml
//! <aliases>
//!   <alias>
//!     <name>local1</name>
//!     <uri>/tmp/db1</uri>
//!     <user-name/>
//!     <password/>
//!     <configurations>
//!       <config name="cache_type" value="none"/>
//!     </configurations>
//!   </alias>
//! </aliases>
//! ```

use std::collections::BTreeMap;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{ProfileError, ProfileResult};
use crate::record::{ProfileRecord, CONFIGURATIONS, NAME, PASSWORD, URI, USER_NAME};

pub const ALIASES: &str = "aliases";
pub const ALIAS: &str = "alias";
pub const CONFIG: &str = "config";
pub const CONFIG_NAME: &str = "name";
pub const CONFIG_VALUE: &str = "value";

/// Render records as a complete XML document
pub fn write_document(records: &[ProfileRecord]) -> ProfileResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ALIASES)))?;
    for record in records {
        write_alias(&mut writer, record)?;
    }
    writer.write_event(Event::End(BytesEnd::new(ALIASES)))?;

    String::from_utf8(writer.into_inner()).map_err(|e| ProfileError::format(e.to_string()))
}

fn write_alias(writer: &mut Writer<Vec<u8>>, record: &ProfileRecord) -> ProfileResult<()> {
    writer.write_event(Event::Start(BytesStart::new(ALIAS)))?;
    write_text_element(writer, NAME, &record.name)?;
    write_text_element(writer, URI, &record.uri)?;
    write_text_element(writer, USER_NAME, &record.user_name)?;
    write_text_element(writer, PASSWORD, &record.password)?;

    if let Some(configs) = &record.configurations {
        writer.write_event(Event::Start(BytesStart::new(CONFIGURATIONS)))?;
        // BTreeMap keeps entries in key order
        for (key, value) in configs {
            let element = BytesStart::new(CONFIG)
                .with_attributes([(CONFIG_NAME, key.as_str()), (CONFIG_VALUE, value.as_str())]);
            writer.write_event(Event::Empty(element))?;
        }
        writer.write_event(Event::End(BytesEnd::new(CONFIGURATIONS)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ALIAS)))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, value: &str) -> ProfileResult<()> {
    if value.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(tag)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(tag)))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new(tag)))?;
    }
    Ok(())
}

/// Parse an `<aliases>` document back into records
pub fn read_document(xml: &str) -> ProfileResult<Vec<ProfileRecord>> {
    let mut reader = Reader::from_str(xml);
    let mut parser = DocumentParser::default();

    loop {
        match reader.read_event()? {
            Event::Start(start) => parser.open(&start)?,
            Event::Empty(start) => {
                parser.open(&start)?;
                parser.close(start.name().as_ref());
            }
            Event::End(end) => parser.close(end.name().as_ref()),
            Event::Text(text) => {
                if parser.field.is_some() {
                    parser.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if parser.field.is_some() {
                    parser.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    parser.finish()
}

/// Element nesting: aliases (0) > alias (1) > field (2) > config (3)
#[derive(Default)]
struct DocumentParser {
    depth: usize,
    saw_root: bool,
    current: Option<ProfileRecord>,
    field: Option<Vec<u8>>,
    text: String,
    in_configurations: bool,
    records: Vec<ProfileRecord>,
}

impl DocumentParser {
    fn open(&mut self, start: &BytesStart) -> ProfileResult<()> {
        let name = start.name();
        let tag = name.as_ref();

        match self.depth {
            0 => {
                if self.saw_root {
                    return Err(ProfileError::format(format!(
                        "more than one top-level element, found another <{}>",
                        String::from_utf8_lossy(tag)
                    )));
                }
                if tag != ALIASES.as_bytes() {
                    return Err(ProfileError::format(format!(
                        "expected <{ALIASES}> root element, found <{}>",
                        String::from_utf8_lossy(tag)
                    )));
                }
                self.saw_root = true;
            }
            1 if tag == ALIAS.as_bytes() => {
                self.current = Some(ProfileRecord::default());
            }
            2 if self.current.is_some() => {
                if tag == CONFIGURATIONS.as_bytes() {
                    self.in_configurations = true;
                } else if [NAME, URI, USER_NAME, PASSWORD].iter().any(|f| f.as_bytes() == tag) {
                    self.field = Some(tag.to_vec());
                    self.text.clear();
                }
            }
            3 if self.in_configurations && tag == CONFIG.as_bytes() => {
                self.read_config(start)?;
            }
            _ => {}
        }

        self.depth += 1;
        Ok(())
    }

    fn read_config(&mut self, start: &BytesStart) -> ProfileResult<()> {
        let mut key = None;
        let mut value = None;

        for attr in start.attributes() {
            let attr = attr?;
            let attr_value = attr.unescape_value()?.into_owned();
            match attr.key.as_ref() {
                k if k == CONFIG_NAME.as_bytes() => key = Some(attr_value),
                k if k == CONFIG_VALUE.as_bytes() => value = Some(attr_value),
                _ => {}
            }
        }

        let key = key.ok_or_else(|| {
            ProfileError::format(format!("<{CONFIG}> element without a '{CONFIG_NAME}' attribute"))
        })?;

        if let Some(record) = self.current.as_mut() {
            record
                .configurations
                .get_or_insert_with(BTreeMap::new)
                .insert(key, value.unwrap_or_default());
        }
        Ok(())
    }

    fn close(&mut self, tag: &[u8]) {
        self.depth = self.depth.saturating_sub(1);

        match self.depth {
            2 => {
                if self.field.as_deref() == Some(tag) {
                    self.store_field(tag);
                } else if tag == CONFIGURATIONS.as_bytes() {
                    self.in_configurations = false;
                }
            }
            1 if tag == ALIAS.as_bytes() => {
                if let Some(record) = self.current.take() {
                    self.records.push(record);
                }
            }
            _ => {}
        }
    }

    fn store_field(&mut self, tag: &[u8]) {
        self.field = None;
        let text = std::mem::take(&mut self.text);
        let Some(record) = self.current.as_mut() else {
            return;
        };

        if tag == NAME.as_bytes() {
            record.name = text;
        } else if tag == URI.as_bytes() {
            record.uri = text;
        } else if tag == USER_NAME.as_bytes() {
            record.user_name = text;
        } else if tag == PASSWORD.as_bytes() {
            record.password = text;
        }
    }

    fn finish(self) -> ProfileResult<Vec<ProfileRecord>> {
        if !self.saw_root {
            return Err(ProfileError::format(format!("missing <{ALIASES}> root element")));
        }
        if self.depth != 0 {
            return Err(ProfileError::format("unexpected end of document"));
        }
        Ok(self.records)
    }
}
