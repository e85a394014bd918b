use super::sink::{Numbering, SectionSink, DEFAULT_MAX_SECTION_LEVEL};

/// Sink that records every call as a short string, e.g. `section(2)`.
///
/// Useful for checking what a projection did without a real output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSink {
    calls: Vec<String>,
    max_section_level: usize,
    all_numberings: bool,
    anchors: bool,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            max_section_level: DEFAULT_MAX_SECTION_LEVEL,
            all_numberings: false,
            anchors: false,
        }
    }
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_section_level(mut self, level: usize) -> Self {
        self.max_section_level = level;
        self
    }

    pub fn with_all_numberings(mut self) -> Self {
        self.all_numberings = true;
        self
    }

    pub fn with_anchors(mut self) -> Self {
        self.anchors = true;
        self
    }

    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    fn call(&mut self, name: &str) {
        self.calls.push(name.to_string());
    }
}

impl SectionSink for RecordingSink {
    fn max_section_level(&self) -> usize {
        self.max_section_level
    }

    fn supports_numbering(&self, numbering: Numbering) -> bool {
        self.all_numberings || numbering == Numbering::Decimal
    }

    fn supports_anchors(&self) -> bool {
        self.anchors
    }

    fn head(&mut self, title: Option<&str>) {
        self.calls.push(format!("head({title:?})"));
    }
    fn body(&mut self) {
        self.call("body");
    }
    fn body_(&mut self) {
        self.call("body_");
    }

    fn section(&mut self, level: usize) {
        self.calls.push(format!("section({level})"));
    }
    fn section_(&mut self, level: usize) {
        self.calls.push(format!("section_({level})"));
    }
    fn section_title(&mut self, level: usize) {
        self.calls.push(format!("section_title({level})"));
    }
    fn section_title_(&mut self, level: usize) {
        self.calls.push(format!("section_title_({level})"));
    }

    fn paragraph(&mut self) {
        self.call("paragraph");
    }
    fn paragraph_(&mut self) {
        self.call("paragraph_");
    }

    fn list(&mut self) {
        self.call("list");
    }
    fn list_(&mut self) {
        self.call("list_");
    }
    fn numbered_list(&mut self, numbering: Numbering) {
        self.calls.push(format!("numbered_list({numbering})"));
    }
    fn numbered_list_(&mut self) {
        self.call("numbered_list_");
    }
    fn list_item(&mut self) {
        self.call("list_item");
    }
    fn list_item_(&mut self) {
        self.call("list_item_");
    }

    fn definition_list(&mut self) {
        self.call("definition_list");
    }
    fn definition_list_(&mut self) {
        self.call("definition_list_");
    }
    fn defined_term(&mut self) {
        self.call("defined_term");
    }
    fn defined_term_(&mut self) {
        self.call("defined_term_");
    }
    fn definition(&mut self) {
        self.call("definition");
    }
    fn definition_(&mut self) {
        self.call("definition_");
    }

    fn bold(&mut self) {
        self.call("bold");
    }
    fn bold_(&mut self) {
        self.call("bold_");
    }
    fn italic(&mut self) {
        self.call("italic");
    }
    fn italic_(&mut self) {
        self.call("italic_");
    }
    fn monospaced(&mut self) {
        self.call("monospaced");
    }
    fn monospaced_(&mut self) {
        self.call("monospaced_");
    }

    fn verbatim(&mut self, content: &str) {
        self.calls.push(format!("verbatim({content:?})"));
    }
    fn text(&mut self, text: &str) {
        self.calls.push(format!("text({text:?})"));
    }
    fn raw_text(&mut self, text: &str, syntax: &str) {
        self.calls.push(format!("raw_text({syntax}, {text:?})"));
    }
    fn horizontal_rule(&mut self) {
        self.call("horizontal_rule");
    }

    fn table(&mut self) {
        self.call("table");
    }
    fn table_(&mut self) {
        self.call("table_");
    }
    fn table_row(&mut self) {
        self.call("table_row");
    }
    fn table_row_(&mut self) {
        self.call("table_row_");
    }
    fn table_cell(&mut self) {
        self.call("table_cell");
    }
    fn table_cell_(&mut self) {
        self.call("table_cell_");
    }
    fn table_header_cell(&mut self) {
        self.call("table_header_cell");
    }
    fn table_header_cell_(&mut self) {
        self.call("table_header_cell_");
    }

    fn link(&mut self, href: &str) {
        self.calls.push(format!("link({href:?})"));
    }
    fn link_(&mut self) {
        self.call("link_");
    }
    fn figure(&mut self, src: &str, alt: Option<&str>) {
        self.calls.push(format!("figure({src:?}, {alt:?})"));
    }

    fn anchor(&mut self, name: &str) {
        self.calls.push(format!("anchor({name:?})"));
    }
}
