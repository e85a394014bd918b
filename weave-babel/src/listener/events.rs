//! The closed set of document events.

use super::types::{Format, HeaderLevel, ListType, MetaData, Parameters, ResourceReference};
use serde::Serialize;
use std::fmt;

/// A single document construct.
///
/// Structural constructs come as `Begin*`/`End*` pairs that must nest
/// properly; content constructs are `On*` singletons. End events repeat the
/// payload of their begin event (level, type, reference) so consumers never
/// have to re-derive it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    BeginDocument {
        metadata: MetaData,
    },
    EndDocument {
        metadata: MetaData,
    },
    BeginGroup {
        parameters: Parameters,
    },
    EndGroup {
        parameters: Parameters,
    },
    BeginFormat {
        format: Format,
        parameters: Parameters,
    },
    EndFormat {
        format: Format,
        parameters: Parameters,
    },
    BeginParagraph {
        parameters: Parameters,
    },
    EndParagraph {
        parameters: Parameters,
    },
    BeginSection {
        parameters: Parameters,
    },
    EndSection {
        parameters: Parameters,
    },
    BeginHeader {
        level: HeaderLevel,
        id: String,
        parameters: Parameters,
    },
    EndHeader {
        level: HeaderLevel,
        id: String,
        parameters: Parameters,
    },
    BeginList {
        list_type: ListType,
        parameters: Parameters,
    },
    EndList {
        list_type: ListType,
        parameters: Parameters,
    },
    BeginListItem {
        parameters: Parameters,
    },
    EndListItem {
        parameters: Parameters,
    },
    BeginDefinitionList {
        parameters: Parameters,
    },
    EndDefinitionList {
        parameters: Parameters,
    },
    BeginDefinitionTerm,
    EndDefinitionTerm,
    BeginDefinitionDescription,
    EndDefinitionDescription,
    BeginQuotation {
        parameters: Parameters,
    },
    EndQuotation {
        parameters: Parameters,
    },
    BeginQuotationLine,
    EndQuotationLine,
    BeginTable {
        parameters: Parameters,
    },
    EndTable {
        parameters: Parameters,
    },
    BeginTableRow {
        parameters: Parameters,
    },
    EndTableRow {
        parameters: Parameters,
    },
    BeginTableCell {
        parameters: Parameters,
    },
    EndTableCell {
        parameters: Parameters,
    },
    BeginTableHeadCell {
        parameters: Parameters,
    },
    EndTableHeadCell {
        parameters: Parameters,
    },
    BeginLink {
        reference: ResourceReference,
        freestanding: bool,
        parameters: Parameters,
    },
    EndLink {
        reference: ResourceReference,
        freestanding: bool,
        parameters: Parameters,
    },
    BeginMetaData {
        metadata: MetaData,
    },
    EndMetaData {
        metadata: MetaData,
    },
    BeginMacroMarker {
        name: String,
        parameters: Parameters,
        content: Option<String>,
        inline: bool,
    },
    EndMacroMarker {
        name: String,
        parameters: Parameters,
        content: Option<String>,
        inline: bool,
    },
    OnMacro {
        name: String,
        parameters: Parameters,
        content: Option<String>,
        inline: bool,
    },
    OnVerbatim {
        content: String,
        inline: bool,
        parameters: Parameters,
    },
    OnImage {
        reference: ResourceReference,
        freestanding: bool,
        parameters: Parameters,
    },
    OnHorizontalLine {
        parameters: Parameters,
    },
    OnRawText {
        text: String,
        syntax: String,
    },
    OnWord {
        word: String,
    },
    OnSpace,
    OnNewLine,
    OnSpecialSymbol {
        symbol: char,
    },
    OnId {
        name: String,
    },
    OnEmptyLines {
        count: usize,
    },
}

/// Construct an event belongs to, shared by a begin event and its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Document,
    Group,
    Format,
    Paragraph,
    Section,
    Header,
    List,
    ListItem,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    Quotation,
    QuotationLine,
    Table,
    TableRow,
    TableCell,
    TableHeadCell,
    Link,
    MetaData,
    MacroMarker,
    Macro,
    Verbatim,
    Image,
    HorizontalLine,
    RawText,
    Word,
    Space,
    NewLine,
    SpecialSymbol,
    Id,
    EmptyLines,
}

/// Position of an event in the pairing discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventRole {
    Begin,
    End,
    Singleton,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        use Event::*;
        match self {
            BeginDocument { .. } | EndDocument { .. } => EventKind::Document,
            BeginGroup { .. } | EndGroup { .. } => EventKind::Group,
            BeginFormat { .. } | EndFormat { .. } => EventKind::Format,
            BeginParagraph { .. } | EndParagraph { .. } => EventKind::Paragraph,
            BeginSection { .. } | EndSection { .. } => EventKind::Section,
            BeginHeader { .. } | EndHeader { .. } => EventKind::Header,
            BeginList { .. } | EndList { .. } => EventKind::List,
            BeginListItem { .. } | EndListItem { .. } => EventKind::ListItem,
            BeginDefinitionList { .. } | EndDefinitionList { .. } => EventKind::DefinitionList,
            BeginDefinitionTerm | EndDefinitionTerm => EventKind::DefinitionTerm,
            BeginDefinitionDescription | EndDefinitionDescription => {
                EventKind::DefinitionDescription
            }
            BeginQuotation { .. } | EndQuotation { .. } => EventKind::Quotation,
            BeginQuotationLine | EndQuotationLine => EventKind::QuotationLine,
            BeginTable { .. } | EndTable { .. } => EventKind::Table,
            BeginTableRow { .. } | EndTableRow { .. } => EventKind::TableRow,
            BeginTableCell { .. } | EndTableCell { .. } => EventKind::TableCell,
            BeginTableHeadCell { .. } | EndTableHeadCell { .. } => EventKind::TableHeadCell,
            BeginLink { .. } | EndLink { .. } => EventKind::Link,
            BeginMetaData { .. } | EndMetaData { .. } => EventKind::MetaData,
            BeginMacroMarker { .. } | EndMacroMarker { .. } => EventKind::MacroMarker,
            OnMacro { .. } => EventKind::Macro,
            OnVerbatim { .. } => EventKind::Verbatim,
            OnImage { .. } => EventKind::Image,
            OnHorizontalLine { .. } => EventKind::HorizontalLine,
            OnRawText { .. } => EventKind::RawText,
            OnWord { .. } => EventKind::Word,
            OnSpace => EventKind::Space,
            OnNewLine => EventKind::NewLine,
            OnSpecialSymbol { .. } => EventKind::SpecialSymbol,
            OnId { .. } => EventKind::Id,
            OnEmptyLines { .. } => EventKind::EmptyLines,
        }
    }

    pub fn role(&self) -> EventRole {
        let name = self.name();
        if name.starts_with("begin_") {
            EventRole::Begin
        } else if name.starts_with("end_") {
            EventRole::End
        } else {
            EventRole::Singleton
        }
    }

    pub fn is_begin(&self) -> bool {
        self.role() == EventRole::Begin
    }

    pub fn is_end(&self) -> bool {
        self.role() == EventRole::End
    }

    /// Stable snake-case name, matching the serialized `event` tag.
    pub fn name(&self) -> &'static str {
        use Event::*;
        match self {
            BeginDocument { .. } => "begin_document",
            EndDocument { .. } => "end_document",
            BeginGroup { .. } => "begin_group",
            EndGroup { .. } => "end_group",
            BeginFormat { .. } => "begin_format",
            EndFormat { .. } => "end_format",
            BeginParagraph { .. } => "begin_paragraph",
            EndParagraph { .. } => "end_paragraph",
            BeginSection { .. } => "begin_section",
            EndSection { .. } => "end_section",
            BeginHeader { .. } => "begin_header",
            EndHeader { .. } => "end_header",
            BeginList { .. } => "begin_list",
            EndList { .. } => "end_list",
            BeginListItem { .. } => "begin_list_item",
            EndListItem { .. } => "end_list_item",
            BeginDefinitionList { .. } => "begin_definition_list",
            EndDefinitionList { .. } => "end_definition_list",
            BeginDefinitionTerm => "begin_definition_term",
            EndDefinitionTerm => "end_definition_term",
            BeginDefinitionDescription => "begin_definition_description",
            EndDefinitionDescription => "end_definition_description",
            BeginQuotation { .. } => "begin_quotation",
            EndQuotation { .. } => "end_quotation",
            BeginQuotationLine => "begin_quotation_line",
            EndQuotationLine => "end_quotation_line",
            BeginTable { .. } => "begin_table",
            EndTable { .. } => "end_table",
            BeginTableRow { .. } => "begin_table_row",
            EndTableRow { .. } => "end_table_row",
            BeginTableCell { .. } => "begin_table_cell",
            EndTableCell { .. } => "end_table_cell",
            BeginTableHeadCell { .. } => "begin_table_head_cell",
            EndTableHeadCell { .. } => "end_table_head_cell",
            BeginLink { .. } => "begin_link",
            EndLink { .. } => "end_link",
            BeginMetaData { .. } => "begin_meta_data",
            EndMetaData { .. } => "end_meta_data",
            BeginMacroMarker { .. } => "begin_macro_marker",
            EndMacroMarker { .. } => "end_macro_marker",
            OnMacro { .. } => "on_macro",
            OnVerbatim { .. } => "on_verbatim",
            OnImage { .. } => "on_image",
            OnHorizontalLine { .. } => "on_horizontal_line",
            OnRawText { .. } => "on_raw_text",
            OnWord { .. } => "on_word",
            OnSpace => "on_space",
            OnNewLine => "on_new_line",
            OnSpecialSymbol { .. } => "on_special_symbol",
            OnId { .. } => "on_id",
            OnEmptyLines { .. } => "on_empty_lines",
        }
    }

    /// Shorthand for a header begin event without parameters.
    pub fn begin_header(level: HeaderLevel, id: impl Into<String>) -> Self {
        Event::BeginHeader {
            level,
            id: id.into(),
            parameters: Parameters::new(),
        }
    }

    /// Shorthand for a header end event without parameters.
    pub fn end_header(level: HeaderLevel, id: impl Into<String>) -> Self {
        Event::EndHeader {
            level,
            id: id.into(),
            parameters: Parameters::new(),
        }
    }

    pub fn word(word: impl Into<String>) -> Self {
        Event::OnWord { word: word.into() }
    }
}

/// Compact one-line rendering used by the `events` trace format.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Event::*;
        let name = self.name();
        let suffix = |params: &Parameters| {
            if params.is_empty() {
                String::new()
            } else {
                format!(" {params}")
            }
        };
        match self {
            BeginDocument { metadata }
            | EndDocument { metadata }
            | BeginMetaData { metadata }
            | EndMetaData { metadata } => write!(f, "{name}{}", suffix(metadata)),
            BeginGroup { parameters }
            | EndGroup { parameters }
            | BeginParagraph { parameters }
            | EndParagraph { parameters }
            | BeginSection { parameters }
            | EndSection { parameters }
            | BeginListItem { parameters }
            | EndListItem { parameters }
            | BeginDefinitionList { parameters }
            | EndDefinitionList { parameters }
            | BeginQuotation { parameters }
            | EndQuotation { parameters }
            | BeginTable { parameters }
            | EndTable { parameters }
            | BeginTableRow { parameters }
            | EndTableRow { parameters }
            | BeginTableCell { parameters }
            | EndTableCell { parameters }
            | BeginTableHeadCell { parameters }
            | EndTableHeadCell { parameters }
            | OnHorizontalLine { parameters } => write!(f, "{name}{}", suffix(parameters)),
            BeginFormat { format, parameters } | EndFormat { format, parameters } => {
                write!(f, "{name}({format}){}", suffix(parameters))
            }
            BeginHeader {
                level,
                id,
                parameters,
            }
            | EndHeader {
                level,
                id,
                parameters,
            } => {
                if id.is_empty() {
                    write!(f, "{name}({level}){}", suffix(parameters))
                } else {
                    write!(f, "{name}({level}, {id:?}){}", suffix(parameters))
                }
            }
            BeginList {
                list_type,
                parameters,
            }
            | EndList {
                list_type,
                parameters,
            } => write!(f, "{name}({list_type:?}){}", suffix(parameters)),
            BeginLink {
                reference,
                freestanding,
                parameters,
            }
            | EndLink {
                reference,
                freestanding,
                parameters,
            }
            | OnImage {
                reference,
                freestanding,
                parameters,
            } => {
                let free = if *freestanding { ", freestanding" } else { "" };
                write!(f, "{name}({:?}{free}){}", reference.reference, suffix(parameters))
            }
            BeginMacroMarker {
                name: macro_name,
                parameters,
                ..
            }
            | EndMacroMarker {
                name: macro_name,
                parameters,
                ..
            }
            | OnMacro {
                name: macro_name,
                parameters,
                ..
            } => write!(f, "{name}({macro_name}){}", suffix(parameters)),
            OnVerbatim {
                content,
                inline,
                parameters,
            } => {
                let mode = if *inline { "inline" } else { "block" };
                write!(f, "{name}({mode}, {content:?}){}", suffix(parameters))
            }
            OnRawText { text, syntax } => write!(f, "{name}({syntax}, {text:?})"),
            OnWord { word } => write!(f, "{name}({word:?})"),
            OnSpecialSymbol { symbol } => write!(f, "{name}({symbol:?})"),
            OnId { name: id } => write!(f, "{name}({id:?})"),
            OnEmptyLines { count } => write!(f, "{name}({count})"),
            BeginDefinitionTerm
            | EndDefinitionTerm
            | BeginDefinitionDescription
            | EndDefinitionDescription
            | BeginQuotationLine
            | EndQuotationLine
            | OnSpace
            | OnNewLine => f.write_str(name),
        }
    }
}
