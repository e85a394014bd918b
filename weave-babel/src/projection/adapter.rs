//! Listener that re-emits the event stream against a [`SectionSink`].

use super::loss::{Degradation, ProjectionLoss};
use super::sink::{Numbering, SectionSink};
use crate::listener::{Event, EventKind, Format, HeaderLevel, Listener, ListType};

/// Open explicit section. `level` is set by the first header inside it.
#[derive(Debug)]
struct SectionFrame {
    level: Option<usize>,
    /// Sink containers open when the section began. Only a header at this
    /// depth may leave its sink section open until `EndSection`.
    depth: usize,
}

/// Open header with the level projected at begin time.
#[derive(Debug)]
struct HeaderFrame {
    level: usize,
    /// Opened its own sink section, closed again with the header.
    standalone: bool,
}

/// Projects the full event vocabulary onto a narrower [`SectionSink`].
///
/// The source stream's pairing is preserved: every sink open call the
/// adapter makes is matched by exactly one close call, even when levels are
/// clamped or constructs are dropped.
pub struct SinkListener<S: SectionSink> {
    sink: S,
    sections: Vec<SectionFrame>,
    headers: Vec<HeaderFrame>,
    /// Sink containers currently open, deferred sections included.
    depth: usize,
    losses: Vec<ProjectionLoss>,
}

impl<S: SectionSink> SinkListener<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            sections: Vec::new(),
            headers: Vec::new(),
            depth: 0,
            losses: Vec::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn losses(&self) -> &[ProjectionLoss] {
        &self.losses
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn record(&mut self, construct: EventKind, degradation: Degradation) {
        let loss = ProjectionLoss::new(construct, degradation);
        tracing::debug!(%loss, "projection loss");
        self.losses.push(loss);
    }

    fn project_level(&mut self, level: HeaderLevel) -> usize {
        let max = self.sink.max_section_level();
        let projected = level.clamp_to(max);
        if projected != level.get() {
            self.record(
                EventKind::Header,
                Degradation::Clamped {
                    from: level.get(),
                    to: projected,
                },
            );
        }
        projected
    }

    fn numbering(&mut self, list_type: ListType) -> Numbering {
        let wanted = match list_type {
            ListType::Bulleted | ListType::Numbered => Numbering::Decimal,
            ListType::LowerAlpha => Numbering::LowerAlpha,
            ListType::UpperAlpha => Numbering::UpperAlpha,
            ListType::LowerRoman => Numbering::LowerRoman,
            ListType::UpperRoman => Numbering::UpperRoman,
        };
        if self.sink.supports_numbering(wanted) {
            return wanted;
        }
        self.record(
            EventKind::List,
            Degradation::Narrowed {
                from: list_type,
                to: Numbering::Decimal,
            },
        );
        Numbering::Decimal
    }

    fn begin_header(&mut self, level: HeaderLevel, id: &str) {
        let level = self.project_level(level);
        let depth = self.depth;
        let standalone = match self.sections.last_mut() {
            Some(section) if section.level.is_none() && section.depth == depth => {
                section.level = Some(level);
                false
            }
            _ => true,
        };
        if !standalone {
            self.depth += 1;
        }
        self.sink.section(level);
        self.sink.section_title(level);
        if !id.is_empty() && self.sink.supports_anchors() {
            self.sink.anchor(id);
        }
        self.headers.push(HeaderFrame { level, standalone });
    }

    fn end_header(&mut self, level: HeaderLevel) {
        let frame = self.headers.pop().unwrap_or_else(|| {
            tracing::warn!(%level, "header closed with no open header");
            HeaderFrame {
                level: level.clamp_to(self.sink.max_section_level()),
                standalone: true,
            }
        });
        self.sink.section_title_(frame.level);
        if frame.standalone {
            self.sink.section_(frame.level);
        }
    }

    fn end_section(&mut self) {
        match self.sections.pop() {
            Some(SectionFrame {
                level: Some(level),
                ..
            }) => {
                self.depth = self.depth.saturating_sub(1);
                self.sink.section_(level);
            }
            Some(SectionFrame { level: None, .. }) => {}
            None => tracing::warn!("section closed with no open section"),
        }
    }

    fn begin_format(&mut self, format: Format) {
        match format {
            Format::Bold => self.sink.bold(),
            Format::Italic => self.sink.italic(),
            Format::Monospace => self.sink.monospaced(),
            Format::Strikeout | Format::Underline | Format::Superscript | Format::Subscript => {
                self.record(EventKind::Format, Degradation::FormatDropped(format))
            }
        }
    }

    fn end_format(&mut self, format: Format) {
        match format {
            Format::Bold => self.sink.bold_(),
            Format::Italic => self.sink.italic_(),
            Format::Monospace => self.sink.monospaced_(),
            Format::Strikeout | Format::Underline | Format::Superscript | Format::Subscript => {}
        }
    }
}

/// Whether `event` opens or closes a container on the sink side. Sections
/// are tracked separately.
fn is_sink_container(event: &Event) -> bool {
    match event {
        Event::BeginFormat { format, .. } | Event::EndFormat { format, .. } => {
            matches!(format, Format::Bold | Format::Italic | Format::Monospace)
        }
        _ => matches!(
            event.kind(),
            EventKind::Paragraph
                | EventKind::QuotationLine
                | EventKind::List
                | EventKind::ListItem
                | EventKind::DefinitionList
                | EventKind::DefinitionTerm
                | EventKind::DefinitionDescription
                | EventKind::Table
                | EventKind::TableRow
                | EventKind::TableCell
                | EventKind::TableHeadCell
                | EventKind::Link
        ),
    }
}

impl<S: SectionSink> Listener for SinkListener<S> {
    fn on_event(&mut self, event: &Event) {
        if is_sink_container(event) {
            if event.is_begin() {
                self.depth += 1;
            } else if event.is_end() {
                self.depth = self.depth.saturating_sub(1);
            }
        }

        match event {
            Event::BeginDocument { metadata } => {
                self.sink.head(metadata.get("title"));
                self.sink.body();
            }
            Event::EndDocument { .. } => self.sink.body_(),

            Event::BeginSection { .. } => self.sections.push(SectionFrame {
                level: None,
                depth: self.depth,
            }),
            Event::EndSection { .. } => self.end_section(),
            Event::BeginHeader { level, id, .. } => self.begin_header(*level, id),
            Event::EndHeader { level, .. } => self.end_header(*level),

            Event::BeginParagraph { .. } => self.sink.paragraph(),
            Event::EndParagraph { .. } => self.sink.paragraph_(),

            Event::BeginList { list_type, .. } => match list_type {
                ListType::Bulleted => self.sink.list(),
                other => {
                    let numbering = self.numbering(*other);
                    self.sink.numbered_list(numbering);
                }
            },
            Event::EndList { list_type, .. } => match list_type {
                ListType::Bulleted => self.sink.list_(),
                _ => self.sink.numbered_list_(),
            },
            Event::BeginListItem { .. } => self.sink.list_item(),
            Event::EndListItem { .. } => self.sink.list_item_(),

            Event::BeginDefinitionList { .. } => self.sink.definition_list(),
            Event::EndDefinitionList { .. } => self.sink.definition_list_(),
            Event::BeginDefinitionTerm => self.sink.defined_term(),
            Event::EndDefinitionTerm => self.sink.defined_term_(),
            Event::BeginDefinitionDescription => self.sink.definition(),
            Event::EndDefinitionDescription => self.sink.definition_(),

            Event::BeginFormat { format, .. } => self.begin_format(*format),
            Event::EndFormat { format, .. } => self.end_format(*format),

            Event::BeginTable { .. } => self.sink.table(),
            Event::EndTable { .. } => self.sink.table_(),
            Event::BeginTableRow { .. } => self.sink.table_row(),
            Event::EndTableRow { .. } => self.sink.table_row_(),
            Event::BeginTableCell { .. } => self.sink.table_cell(),
            Event::EndTableCell { .. } => self.sink.table_cell_(),
            Event::BeginTableHeadCell { .. } => self.sink.table_header_cell(),
            Event::EndTableHeadCell { .. } => self.sink.table_header_cell_(),

            Event::BeginLink { reference, .. } => self.sink.link(&reference.reference),
            Event::EndLink { .. } => self.sink.link_(),

            // No sink equivalent; children are still forwarded.
            Event::BeginGroup { .. } => self.record(EventKind::Group, Degradation::Elided),
            Event::EndGroup { .. } => {}
            Event::BeginMetaData { .. } => self.record(EventKind::MetaData, Degradation::Elided),
            Event::EndMetaData { .. } => {}
            Event::BeginQuotation { .. } => {
                self.record(EventKind::Quotation, Degradation::Elided)
            }
            Event::EndQuotation { .. } => {}
            // Lines keep apart as paragraphs once the quotation is gone.
            Event::BeginQuotationLine => self.sink.paragraph(),
            Event::EndQuotationLine => self.sink.paragraph_(),
            Event::BeginMacroMarker { .. } => {
                self.record(EventKind::MacroMarker, Degradation::Elided)
            }
            Event::EndMacroMarker { .. } => {}
            Event::OnMacro { .. } => self.record(EventKind::Macro, Degradation::Elided),
            Event::OnEmptyLines { .. } => {}

            Event::OnId { name } => {
                if self.sink.supports_anchors() {
                    self.sink.anchor(name);
                } else {
                    self.record(EventKind::Id, Degradation::Elided);
                }
            }

            Event::OnVerbatim {
                content, inline, ..
            } => {
                if *inline {
                    self.sink.monospaced();
                    self.sink.text(content);
                    self.sink.monospaced_();
                } else {
                    self.sink.verbatim(content);
                }
            }
            Event::OnImage {
                reference,
                parameters,
                ..
            } => self.sink.figure(&reference.reference, parameters.get("alt")),
            Event::OnHorizontalLine { .. } => self.sink.horizontal_rule(),
            Event::OnRawText { text, syntax } => self.sink.raw_text(text, syntax),

            Event::OnWord { word } => self.sink.text(word),
            Event::OnSpace => self.sink.text(" "),
            Event::OnNewLine => self.sink.text("\n"),
            Event::OnSpecialSymbol { symbol } => {
                let mut buffer = [0u8; 4];
                self.sink.text(symbol.encode_utf8(&mut buffer));
            }
        }
    }
}
