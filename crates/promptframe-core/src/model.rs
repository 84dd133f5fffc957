use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form node attributes, carried through untouched.
pub type Attrs = Map<String, Value>;

/// Inline formatting applied to a run (bold, link, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
}

/// A piece of inline content: a text run or an inline atom such as a hard break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineRun {
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
}

impl InlineRun {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
            marks: Vec::new(),
            attrs: None,
        }
    }
}

/// A paragraph: the only kind of block the section parser reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    #[serde(default)]
    pub runs: Vec<InlineRun>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
}

impl TextLine {
    /// A paragraph holding `text` as a single unmarked run.
    ///
    /// Empty text yields a paragraph with no runs.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![InlineRun::text(text)]
        };
        Self { runs, attrs: None }
    }

    pub fn text(&self) -> String {
        runs_text(&self.runs)
    }
}

/// Any other block: headings, lists, code blocks, quotes, custom blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
    /// Inline content owned directly by this block (e.g. heading text).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runs: Vec<InlineRun>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockNode>,
}

/// A top-level or nested block in a [`Document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum BlockNode {
    TextLine(TextLine),
    Container(Container),
}

impl BlockNode {
    pub fn paragraph(text: impl Into<String>) -> Self {
        BlockNode::TextLine(TextLine::plain(text))
    }

    pub fn empty_paragraph() -> Self {
        BlockNode::TextLine(TextLine::default())
    }

    /// Type tag as the editor names it.
    pub fn kind(&self) -> &str {
        match self {
            BlockNode::TextLine(_) => "paragraph",
            BlockNode::Container(c) => &c.kind,
        }
    }

    pub fn as_text_line(&self) -> Option<&TextLine> {
        match self {
            BlockNode::TextLine(line) => Some(line),
            BlockNode::Container(_) => None,
        }
    }

    pub fn is_text_line(&self) -> bool {
        matches!(self, BlockNode::TextLine(_))
    }

    /// All text under this node: own runs first, then children, no separators.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            BlockNode::TextLine(line) => {
                for run in &line.runs {
                    out.push_str(&run.text);
                }
            }
            BlockNode::Container(container) => {
                for run in &container.runs {
                    out.push_str(&run.text);
                }
                for child in &container.children {
                    child.push_text(out);
                }
            }
        }
    }
}

fn runs_text(runs: &[InlineRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

/// A document as ordered blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<BlockNode>,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    pub fn new(blocks: Vec<BlockNode>) -> Self {
        Self { blocks }
    }

    /// The minimal document: one empty paragraph.
    pub fn empty() -> Self {
        Self {
            blocks: vec![BlockNode::empty_paragraph()],
        }
    }

    /// One plain paragraph per line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blocks: lines.into_iter().map(BlockNode::paragraph).collect(),
        }
    }

    /// Substitute the minimal document when there are no blocks at all.
    pub fn or_empty(self) -> Self {
        if self.blocks.is_empty() {
            Self::empty()
        } else {
            self
        }
    }

    /// Flattened text of every top-level block.
    pub fn lines(&self) -> Vec<String> {
        self.blocks.iter().map(BlockNode::plain_text).collect()
    }

    /// Whole-document text, blocks joined by newlines and trimmed.
    pub fn body_text(&self) -> String {
        self.lines().join("\n").trim().to_string()
    }

    pub fn has_text(&self) -> bool {
        !self.body_text().is_empty()
    }
}
