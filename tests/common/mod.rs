//! Shared test utilities and fixture generators

#![allow(dead_code)]

use chrono::{Local, TimeZone};
use lastpass2keepass::pipeline::{RunContext, TimestampStyle};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Header row as LastPass writes it
pub const LASTPASS_HEADER: &str = "url,username,password,totp,extra,name,grouping,fav";

/// Write `lines` to a CSV file inside `temp_dir`
pub fn write_csv(temp_dir: &TempDir, name: &str, lines: &[&str]) -> PathBuf {
    let path = temp_dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path
}

/// The two-row export used throughout the tests:
/// "Bank" in the Finance folder and "Mail" without a folder.
pub fn bank_and_mail_csv() -> String {
    [
        "name,url,username,password,extra,grouping",
        "Bank,bank.com,u1,p1,,Finance",
        "Mail,mail.com,u2,p2,,",
    ]
    .join("\n")
}

/// Run context with a fixed afternoon timestamp
pub fn fixed_context(database_name: &str) -> RunContext {
    let at = Local.with_ymd_and_hms(2024, 6, 1, 14, 30, 15).unwrap();
    RunContext::new(database_name, at, TimestampStyle::Legacy)
}

/// Minimal element tree for asserting on rendered documents
#[derive(Debug, Default, Clone)]
pub struct Node {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn child(&self, name: &str) -> &Node {
        self.children
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("<{}> has no <{}> child", self.name, name))
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn text_of(&self, name: &str) -> &str {
        &self.child(name).text
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// `<Value>` node of the `<String>` whose key is `key`
    pub fn string_value(&self, key: &str) -> Option<&Node> {
        self.children_named("String")
            .find(|s| s.text_of("Key") == key)
            .map(|s| s.child("Value"))
    }

    /// Names of the direct child groups
    pub fn group_names(&self) -> Vec<&str> {
        self.children_named("Group").map(|g| g.text_of("Name")).collect()
    }

    /// Titles of the direct child entries
    pub fn entry_titles(&self) -> Vec<&str> {
        self.children_named("Entry")
            .map(|e| e.string_value("Title").map(|v| v.text.as_str()).unwrap_or(""))
            .collect()
    }
}

/// Parse XML into a tree; the returned node is the document itself.
pub fn parse_xml(xml: &str) -> Node {
    let mut reader = Reader::from_str(xml);
    let mut stack = vec![Node::default()];

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => stack.push(node_from(&e)),
            Event::Empty(e) => {
                let node = node_from(&e);
                stack.last_mut().unwrap().children.push(node);
            }
            Event::Text(t) => {
                let text = t.unescape().unwrap();
                stack.last_mut().unwrap().text.push_str(&text);
            }
            Event::End(_) => {
                let node = stack.pop().unwrap();
                stack.last_mut().unwrap().children.push(node);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    assert_eq!(stack.len(), 1, "unbalanced document");
    stack.pop().unwrap()
}

/// The top-level `<Group>` inside `<Root>`
pub fn root_group(doc: &Node) -> &Node {
    doc.child("KeePassFile").child("Root").child("Group")
}

fn node_from(e: &BytesStart) -> Node {
    Node {
        name: String::from_utf8(e.name().as_ref().to_vec()).unwrap(),
        attrs: e
            .attributes()
            .map(|a| {
                let a = a.unwrap();
                (
                    String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                    a.unescape_value().unwrap().into_owned(),
                )
            })
            .collect(),
        ..Default::default()
    }
}
