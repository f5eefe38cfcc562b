//! Content node assertions

use crate::page::ast::ContentNode;

pub struct ContentAssertion<'a> {
    pub(crate) node: &'a ContentNode,
    pub(crate) context: String,
}

impl<'a> ContentAssertion<'a> {
    fn wrong_kind(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.node.node_type()
        )
    }

    pub fn assert_paragraph(self) -> ParagraphAssertion<'a> {
        match self.node {
            ContentNode::Paragraph { text } => ParagraphAssertion {
                text,
                context: self.context,
            },
            _ => self.wrong_kind("Paragraph"),
        }
    }

    pub fn assert_bullets(self) -> ListAssertion<'a> {
        match self.node {
            ContentNode::BulletList { items } => ListAssertion {
                items,
                context: self.context,
            },
            _ => self.wrong_kind("BulletList"),
        }
    }

    pub fn assert_table(self) -> TableAssertion<'a> {
        match self.node {
            ContentNode::Table { header, rows } => TableAssertion {
                header,
                rows,
                context: self.context,
            },
            _ => self.wrong_kind("Table"),
        }
    }

    pub fn assert_pros_cons(self) -> ProsConsAssertion<'a> {
        match self.node {
            ContentNode::ProsConsBlock { pros, cons } => ProsConsAssertion {
                pros,
                cons,
                context: self.context,
            },
            _ => self.wrong_kind("ProsConsBlock"),
        }
    }

    pub fn assert_key_value(self) -> KeyValueAssertion<'a> {
        match self.node {
            ContentNode::KeyValueLine { label, value } => KeyValueAssertion {
                label,
                value,
                context: self.context,
            },
            _ => self.wrong_kind("KeyValueLine"),
        }
    }
}

pub struct ParagraphAssertion<'a> {
    text: &'a str,
    context: String,
}

impl<'a> ParagraphAssertion<'a> {
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.text, expected,
            "{}: Expected paragraph text '{}', but got '{}'",
            self.context, expected, self.text
        );
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        assert!(
            self.text.contains(substring),
            "{}: Expected paragraph to contain '{}', but got '{}'",
            self.context,
            substring,
            self.text
        );
        self
    }
}

pub struct ListAssertion<'a> {
    items: &'a [String],
    context: String,
}

impl<'a> ListAssertion<'a> {
    pub fn item_count(self, expected: usize) -> Self {
        assert_eq!(
            self.items.len(),
            expected,
            "{}: Expected {} items, found {}: {:?}",
            self.context,
            expected,
            self.items.len(),
            self.items
        );
        self
    }

    pub fn items(self, expected: &[&str]) -> Self {
        assert_eq!(self.items, expected, "{}: list items differ", self.context);
        self
    }
}

pub struct TableAssertion<'a> {
    header: &'a [String],
    rows: &'a [Vec<String>],
    context: String,
}

impl<'a> TableAssertion<'a> {
    pub fn header(self, expected: &[&str]) -> Self {
        assert_eq!(self.header, expected, "{}: table header differs", self.context);
        self
    }

    pub fn row_count(self, expected: usize) -> Self {
        assert_eq!(
            self.rows.len(),
            expected,
            "{}: Expected {} rows, found {}",
            self.context,
            expected,
            self.rows.len()
        );
        self
    }

    pub fn row(self, index: usize, expected: &[&str]) -> Self {
        assert!(
            index < self.rows.len(),
            "{}: Row index {} out of bounds (table has {} rows)",
            self.context,
            index,
            self.rows.len()
        );
        assert_eq!(
            self.rows[index], expected,
            "{}: row {} differs",
            self.context, index
        );
        self
    }

    /// Every row has as many cells as the header
    pub fn rectangular(self) -> Self {
        for (index, row) in self.rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                self.header.len(),
                "{}: row {} has {} cells, header has {}",
                self.context,
                index,
                row.len(),
                self.header.len()
            );
        }
        self
    }
}

pub struct ProsConsAssertion<'a> {
    pros: &'a [String],
    cons: &'a [String],
    context: String,
}

impl<'a> ProsConsAssertion<'a> {
    pub fn pros(self, expected: &[&str]) -> Self {
        assert_eq!(self.pros, expected, "{}: pros differ", self.context);
        self
    }

    pub fn cons(self, expected: &[&str]) -> Self {
        assert_eq!(self.cons, expected, "{}: cons differ", self.context);
        self
    }
}

pub struct KeyValueAssertion<'a> {
    label: &'a str,
    value: &'a str,
    context: String,
}

impl<'a> KeyValueAssertion<'a> {
    pub fn label(self, expected: &str) -> Self {
        assert_eq!(
            self.label, expected,
            "{}: Expected label '{}', but got '{}'",
            self.context, expected, self.label
        );
        self
    }

    pub fn value(self, expected: &str) -> Self {
        assert_eq!(
            self.value, expected,
            "{}: Expected value '{}', but got '{}'",
            self.context, expected, self.value
        );
        self
    }
}
