//! Treeviz formatter for documents
//!
//! One line per node, nesting drawn with box connectors, labels truncated to 30 characters.
//!
//!     ⧉ Best Bitcoin Casinos
//!     └─ § Best Bitcoin Casinos UK
//!       ├─ ¶ Bitcoin casinos are growing...
//!       ├─ § Comparison [comparison_table]
//!       │ └─ ▦ Casino | Bonus
//!       │   └─ ↵ Casino Royale | 100%
//!       └─ § 1. Casino Royale - Fast P... [platform_review]
//!         └─ ± 2 pros, 1 cons
//!           ├─ + Fast payouts
//!           ├─ + Big bonus
//!           └─ − Few games
//!
//! Icons
//!     Document: ⧉
//!     Section: §
//!     Paragraph: ¶
//!     BulletList: ☰   (items: •)
//!     Table: ▦        (rows: ↵)
//!     ProsConsBlock: ± (pros: +, cons: −)
//!     KeyValueLine: ≔

use crate::page::ast::{ContentNode, Document, Section, SectionType};

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Display tree built from the document before formatting
struct Node {
    icon: &'static str,
    label: String,
    suffix: String,
    children: Vec<Node>,
}

impl Node {
    fn leaf(icon: &'static str, label: impl Into<String>) -> Self {
        Self {
            icon,
            label: label.into(),
            suffix: String::new(),
            children: Vec::new(),
        }
    }
}

fn section_node(section: &Section) -> Node {
    let suffix = match section.section_type {
        SectionType::Standard => String::new(),
        other => format!(" [{}]", other),
    };
    let children = section
        .body
        .iter()
        .map(content_node)
        .chain(section.children.iter().map(section_node))
        .collect();
    Node {
        icon: "§",
        label: section.heading_text.clone(),
        suffix,
        children,
    }
}

fn content_node(content: &ContentNode) -> Node {
    match content {
        ContentNode::Paragraph { text } => Node::leaf("¶", text.as_str()),
        ContentNode::BulletList { items } => Node {
            children: items.iter().map(|i| Node::leaf("•", i.as_str())).collect(),
            ..Node::leaf("☰", format!("{} items", items.len()))
        },
        ContentNode::Table { header, rows } => Node {
            children: rows
                .iter()
                .map(|row| Node::leaf("↵", row.join(" | ")))
                .collect(),
            ..Node::leaf("▦", header.join(" | "))
        },
        ContentNode::ProsConsBlock { pros, cons } => Node {
            children: pros
                .iter()
                .map(|p| Node::leaf("+", p.as_str()))
                .chain(cons.iter().map(|c| Node::leaf("−", c.as_str())))
                .collect(),
            ..Node::leaf("±", format!("{} pros, {} cons", pros.len(), cons.len()))
        },
        ContentNode::KeyValueLine { label, value } if value.is_empty() => {
            Node::leaf("≔", format!("{}:", label))
        }
        ContentNode::KeyValueLine { label, value } => {
            Node::leaf("≔", format!("{}: {}", label, value))
        }
    }
}

fn format_node(node: &Node, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}{}\n",
        prefix,
        connector,
        node.icon,
        truncate(&node.label, LABEL_WIDTH),
        node.suffix
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(&node.children, &child_prefix, output);
}

fn format_children(children: &[Node], prefix: &str, output: &mut String) {
    for (i, child) in children.iter().enumerate() {
        format_node(child, prefix, i == children.len() - 1, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let title = match doc.metadata.fallback_title() {
        "" => "Document",
        title => title,
    };
    let mut output = format!("⧉ {}\n", truncate(title, LABEL_WIDTH));

    let sections: Vec<Node> = doc.sections.iter().map(section_node).collect();
    format_children(&sections, "", &mut output);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::parsing::parse_document;

    #[test]
    fn test_empty_document() {
        assert_eq!(to_treeviz_str(&Document::default()), "⧉ Document\n");
    }

    #[test]
    fn test_nesting_and_icons() {
        let doc = parse_document(
            "Meta Title: Guide\nContent\nGuide (h1)\nIntro text.\n\nGames (h2)\n• Slots\n• Poker\n",
        );
        let expected = "\
⧉ Guide
└─ § Guide
  ├─ ¶ Intro text.
  └─ § Games
    └─ ☰ 2 items
      ├─ • Slots
      └─ • Poker
";
        assert_eq!(to_treeviz_str(&doc), expected);
    }

    #[test]
    fn test_truncation() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
