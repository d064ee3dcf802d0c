//! Chapter markup reader.
//!
//! [`ChapterParser`] is the seam between the converter and whatever turns a
//! chapter document into nodes. [`MarkupChapterParser`] reads the normalized
//! chapter markup used by this tool:
//!
//! ```text
//! <chapter>
//!   <class code="A00-A09">
//!     <label>Infektiöse Darmkrankheiten</label>
//!     <class code="A00">
//!       <label>Cholera</label>
//!       <incl code="A00.0">Klassische Cholera</incl>
//!       <excl>Cholera-ähnliche Diarrhoe</excl>
//!       <hint>Soll zusätzlich kodiert werden</hint>
//!     </class>
//!   </class>
//! </chapter>
//! ```
//!
//! `class` elements nest to form the hierarchy. On OPS documents a
//! `curated="true"` attribute marks codes added outside the official catalog,
//! and `code` attributes on criteria are ignored. Unknown elements inside a
//! class are skipped along with their text, and a class nested in one is an
//! error; inside a text element they are transparent.

use gft_model::ClassificationKind;
use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};

use crate::archive::ChapterDocument;
use crate::error::{Result, SourceError};
use crate::node::{DiseaseDetails, NodeDetails, NodeId, NodeTreeBuilder, ProcedureDetails};

/// Turns one chapter document into nodes below the tree root.
pub trait ChapterParser {
    /// Attach the document's top-level classes to the root of `builder`.
    ///
    /// Returns the number of nodes added.
    fn parse(&self, document: &ChapterDocument, builder: &mut NodeTreeBuilder) -> Result<usize>;
}

/// quick-xml based reader for normalized chapter markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupChapterParser;

/// A class whose end tag has not been seen yet.
#[derive(Debug)]
struct PendingClass {
    code: String,
    label: String,
    details: NodeDetails,
    children: Vec<PendingClass>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Label,
    Inclusion,
    Exclusion,
    Hint,
}

impl FieldKind {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        if tag.eq_ignore_ascii_case(b"label") {
            Some(Self::Label)
        } else if tag.eq_ignore_ascii_case(b"incl") {
            Some(Self::Inclusion)
        } else if tag.eq_ignore_ascii_case(b"excl") {
            Some(Self::Exclusion)
        } else if tag.eq_ignore_ascii_case(b"hint") {
            Some(Self::Hint)
        } else {
            None
        }
    }
}

/// Text element currently being collected.
#[derive(Debug)]
struct OpenField {
    kind: FieldKind,
    code: Option<String>,
    text: String,
}

fn is_class_tag(tag: &[u8]) -> bool {
    tag.eq_ignore_ascii_case(b"class")
}

fn attribute(document: &str, element: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    let attr = element
        .try_get_attribute(name)
        .map_err(|err| SourceError::markup(document, err))?;
    let Some(attr) = attr else {
        return Ok(None);
    };
    let raw = String::from_utf8_lossy(&attr.value);
    let value = unescape(&raw).map_err(|err| SourceError::markup(document, err))?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Error for a class found inside an element the reader does not understand.
fn unsupported_wrapper(document: &str, element: &BytesStart<'_>) -> Result<SourceError> {
    let code = attribute(document, element, "code")?.unwrap_or_default();
    Ok(SourceError::markup(
        document,
        format!("class '{code}' inside an unsupported element"),
    ))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl MarkupChapterParser {
    fn open_class(
        &self,
        document: &str,
        element: &BytesStart<'_>,
        kind: ClassificationKind,
    ) -> Result<PendingClass> {
        let code = attribute(document, element, "code")?
            .ok_or_else(|| SourceError::markup(document, "class element without code"))?;
        let mut details = NodeDetails::empty_for(kind);
        if let NodeDetails::Procedure(procedure) = &mut details {
            procedure.curated = attribute(document, element, "curated")?
                .is_some_and(|value| value.eq_ignore_ascii_case("true"));
        }
        Ok(PendingClass {
            code,
            label: String::new(),
            details,
            children: Vec::new(),
        })
    }

    fn close_field(field: OpenField, class: &mut PendingClass) {
        let text = collapse_whitespace(&field.text);
        if field.kind == FieldKind::Label {
            class.label = text;
            return;
        }
        if text.is_empty() {
            return;
        }
        match &mut class.details {
            NodeDetails::Disease(details) => {
                apply_disease_field(details, field.kind, text, field.code);
            }
            NodeDetails::Procedure(details) => apply_procedure_field(details, field.kind, text),
            NodeDetails::Root => {}
        }
    }

    fn attach(
        builder: &mut NodeTreeBuilder,
        parent: NodeId,
        class: PendingClass,
    ) -> Result<usize> {
        let PendingClass {
            code,
            label,
            details,
            children,
        } = class;
        let id = builder.add(parent, &code, &label, details)?;
        let mut added = 1;
        for child in children {
            added += Self::attach(builder, id, child)?;
        }
        Ok(added)
    }
}

fn apply_disease_field(
    details: &mut DiseaseDetails,
    kind: FieldKind,
    text: String,
    code: Option<String>,
) {
    match kind {
        FieldKind::Inclusion => {
            details.inclusions.push(text);
            details.inclusion_codes.push(code);
        }
        FieldKind::Exclusion => {
            details.exclusions.push(text);
            details.exclusion_codes.push(code);
        }
        FieldKind::Hint => details.hints.push(text),
        FieldKind::Label => {}
    }
}

fn apply_procedure_field(details: &mut ProcedureDetails, kind: FieldKind, text: String) {
    match kind {
        FieldKind::Inclusion => details.inclusions.push(text),
        FieldKind::Exclusion => details.exclusions.push(text),
        FieldKind::Hint => details.hints.push(text),
        FieldKind::Label => {}
    }
}

impl ChapterParser for MarkupChapterParser {
    fn parse(&self, document: &ChapterDocument, builder: &mut NodeTreeBuilder) -> Result<usize> {
        let name = document.path.as_str();
        let kind = builder.kind();
        let mut reader = Reader::from_reader(document.contents.as_slice());
        reader.config_mut().check_end_names = false;

        let mut classes: Vec<PendingClass> = Vec::new();
        let mut top_level: Vec<PendingClass> = Vec::new();
        let mut field: Option<OpenField> = None;
        // Depth inside elements we do not understand; their content is dropped.
        let mut skipped_depth = 0usize;
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|err| SourceError::markup(name, err))?;
            match event {
                Event::Start(element) => {
                    let tag = element.name();
                    if skipped_depth > 0 {
                        if is_class_tag(tag.as_ref()) {
                            return Err(unsupported_wrapper(name, &element)?);
                        }
                        skipped_depth += 1;
                    } else if is_class_tag(tag.as_ref()) {
                        if field.is_some() {
                            return Err(SourceError::markup(
                                name,
                                "class nested in a text element",
                            ));
                        }
                        classes.push(self.open_class(name, &element, kind)?);
                    } else if field.is_some() {
                        // Inline markup inside a text element keeps its text.
                    } else if let Some(field_kind) = FieldKind::from_tag(tag.as_ref()) {
                        if classes.is_empty() {
                            skipped_depth = 1;
                        } else {
                            field = Some(OpenField {
                                kind: field_kind,
                                code: attribute(name, &element, "code")?,
                                text: String::new(),
                            });
                        }
                    } else if !classes.is_empty() {
                        skipped_depth = 1;
                    }
                }
                Event::Empty(element) => {
                    if !is_class_tag(element.name().as_ref()) {
                        // Empty non-class elements carry nothing.
                    } else if skipped_depth > 0 {
                        return Err(unsupported_wrapper(name, &element)?);
                    } else {
                        let class = self.open_class(name, &element, kind)?;
                        match classes.last_mut() {
                            Some(parent) => parent.children.push(class),
                            None => top_level.push(class),
                        }
                    }
                }
                Event::End(element) => {
                    if skipped_depth > 0 {
                        skipped_depth -= 1;
                    } else if is_class_tag(element.name().as_ref()) {
                        let class = classes
                            .pop()
                            .ok_or_else(|| SourceError::markup(name, "unbalanced class end tag"))?;
                        match classes.last_mut() {
                            Some(parent) => parent.children.push(class),
                            None => top_level.push(class),
                        }
                    } else if let Some(open) = field.take_if(|open| {
                        FieldKind::from_tag(element.name().as_ref()) == Some(open.kind)
                    }) && let Some(class) = classes.last_mut()
                    {
                        Self::close_field(open, class);
                    }
                }
                Event::Text(text) => {
                    if skipped_depth == 0
                        && let Some(open) = field.as_mut()
                    {
                        let decoded = text.decode().map_err(|err| SourceError::markup(name, err))?;
                        open.text.push_str(&decoded);
                    }
                }
                Event::CData(data) => {
                    if skipped_depth == 0
                        && let Some(open) = field.as_mut()
                    {
                        open.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::GeneralRef(reference) => {
                    if skipped_depth == 0
                        && let Some(open) = field.as_mut()
                    {
                        if let Some(ch) = reference
                            .resolve_char_ref()
                            .map_err(|err| SourceError::markup(name, err))?
                        {
                            open.text.push(ch);
                        } else {
                            let entity =
                                reference.decode().map_err(|err| SourceError::markup(name, err))?;
                            let resolved = resolve_predefined_entity(&entity).ok_or_else(|| {
                                SourceError::markup(name, format!("unknown entity &{entity};"))
                            })?;
                            open.text.push_str(resolved);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = classes.last() {
            return Err(SourceError::markup(
                name,
                format!("class '{}' is never closed", open.code),
            ));
        }

        let mut added = 0;
        for class in top_level {
            added += Self::attach(builder, NodeId::ROOT, class)?;
        }
        Ok(added)
    }
}
