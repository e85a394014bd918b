//! Icon mapping for the tree visualization format

use crate::listener::EventKind;

/// Get the Unicode icon for a construct
///
/// Returns a single character that identifies the construct at a glance in
/// tree output.
pub fn get_icon(kind: EventKind) -> &'static str {
    use EventKind::*;
    match kind {
        Document => "⧉",
        Section => "§",
        Header => "⊤",
        Paragraph => "¶",
        List => "☰",
        ListItem => "•",
        DefinitionList => "≔",
        DefinitionTerm => "◇",
        DefinitionDescription => "➔",
        Quotation => "\"",
        QuotationLine => "↵",
        Table => "▦",
        TableRow => "─",
        TableCell | TableHeadCell => "□",
        Format => "𝐁",
        Link => "⊕",
        Image => "▣",
        Verbatim => "𝒱",
        RawText => "ƒ",
        Macro | MacroMarker => "⋯",
        MetaData => "@",
        Group => "Ψ",
        HorizontalLine | EmptyLines => "⎯",
        Id => "#",
        Word | Space | NewLine | SpecialSymbol => "◦",
    }
}
