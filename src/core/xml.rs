//! XML 轉 `ParsedTree`。
//!
//! 摺疊規則：
//! - 沒有屬性也沒有子元素的元素變成文字 scalar（空元素為 `""`）
//! - 其他元素變成 mapping；重複出現的子元素依文件順序變成 list
//! - 屬性放在 `"$"`，帶屬性或子元素時的文字放在 `"_"`
//! - 註解、處理指令、宣告、doctype 直接略過

use crate::domain::model::{ParsedTree, ATTRIBUTES_KEY, TEXT_KEY};
use crate::utils::error::{EtlError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// 預設保留文字原樣，帳戶類型等代碼必須逐字比對
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// 去除文字前後的空白
    pub trim_text: bool,
}

#[derive(Debug)]
struct Element {
    name: String,
    attributes: BTreeMap<String, ParsedTree>,
    children: BTreeMap<String, ParsedTree>,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = utf8(start.name().as_ref())?.to_string();

        let mut attributes = BTreeMap::new();
        for attr in start.attributes() {
            let attr = attr
                .map_err(|e| EtlError::malformed(format!("invalid attribute on <{}>: {}", name, e)))?;
            let key = utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value().map_err(|e| {
                EtlError::malformed(format!("invalid attribute value on <{}>: {}", name, e))
            })?;
            attributes.insert(key, ParsedTree::Scalar(value.into_owned()));
        }

        Ok(Self {
            name,
            attributes,
            children: BTreeMap::new(),
            text: String::new(),
        })
    }

    fn add_child(&mut self, name: String, value: ParsedTree) {
        match self.children.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                ParsedTree::List(items) => items.push(value),
                existing => {
                    let first = std::mem::replace(existing, ParsedTree::List(Vec::new()));
                    *existing = ParsedTree::List(vec![first, value]);
                }
            },
        }
    }

    fn close(self, options: &ParseOptions) -> (String, ParsedTree) {
        let text = if options.trim_text {
            self.text.trim().to_string()
        } else {
            self.text
        };

        if self.attributes.is_empty() && self.children.is_empty() {
            return (self.name, ParsedTree::Scalar(text));
        }

        let mut map = self.children;
        if !self.attributes.is_empty() {
            map.insert(ATTRIBUTES_KEY.to_string(), ParsedTree::Mapping(self.attributes));
        }
        if !text.trim().is_empty() {
            map.insert(TEXT_KEY.to_string(), ParsedTree::Scalar(text));
        }
        (self.name, ParsedTree::Mapping(map))
    }
}

struct TreeBuilder<'o> {
    options: &'o ParseOptions,
    stack: Vec<Element>,
    root: Option<(String, ParsedTree)>,
}

impl<'o> TreeBuilder<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            stack: Vec::new(),
            root: None,
        }
    }

    fn open(&mut self, start: &BytesStart<'_>) -> Result<()> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(EtlError::malformed("document has more than one root element"));
        }
        self.stack.push(Element::open(start)?);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let element = self
            .stack
            .pop()
            .ok_or_else(|| EtlError::malformed("closing tag without a matching opening tag"))?;
        let (name, value) = element.close(self.options);
        match self.stack.last_mut() {
            Some(parent) => parent.add_child(name, value),
            None => self.root = Some((name, value)),
        }
        Ok(())
    }

    fn text(&mut self, value: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(element) => element.text.push_str(value),
            None if value.trim().is_empty() => {}
            None => return Err(EtlError::malformed("text found outside the root element")),
        }
        Ok(())
    }

    fn finish(self) -> Result<ParsedTree> {
        if let Some(open) = self.stack.last() {
            return Err(EtlError::malformed(format!("unclosed element <{}>", open.name)));
        }
        let (name, value) = self
            .root
            .ok_or_else(|| EtlError::malformed("document has no root element"))?;
        Ok(ParsedTree::Mapping(BTreeMap::from([(name, value)])))
    }
}

/// 解析 XML 位元組；任何無法形成樹的輸入都回傳 `DocumentMalformed`
pub fn parse_document(bytes: &[u8], options: &ParseOptions) -> Result<ParsedTree> {
    let xml = std::str::from_utf8(bytes)
        .map_err(|e| EtlError::malformed(format!("document is not valid UTF-8: {}", e)))?;
    parse_str(xml, options)
}

pub fn parse_str(xml: &str, options: &ParseOptions) -> Result<ParsedTree> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;

    let mut builder = TreeBuilder::new(options);
    loop {
        let event = reader.read_event().map_err(|e| {
            EtlError::malformed(format!("at byte {}: {}", reader.error_position(), e))
        })?;

        match event {
            Event::Start(start) => builder.open(&start)?,
            Event::Empty(start) => {
                builder.open(&start)?;
                builder.close()?;
            }
            Event::End(_) => builder.close()?,
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| EtlError::malformed(format!("invalid text content: {}", e)))?;
                builder.text(&value)?;
            }
            Event::CData(data) => {
                let raw = data.into_inner();
                builder.text(utf8(&raw)?)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    builder.finish()
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| EtlError::malformed(format!("invalid UTF-8: {}", e)))
}
