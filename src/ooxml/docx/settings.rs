/// Document settings part (`word/settings.xml`).
///
/// The settings that affect how a filled-in document behaves are typed:
/// view and zoom, protection, revision tracking, hyphenation, field updates
/// and document variables. Every other child of `w:settings` is kept as
/// markup and written back at its place in the schema sequence, so a decoded
/// part survives a round trip.
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter, attr_string};
use crate::ooxml::docx::options::{ReadOptions, WriteOptions};
use crate::ooxml::docx::types::{OnOff, Toggle};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;

/// Local names of the children of `w:settings`, in schema order.
const SETTINGS_ORDER: &[&str] = &[
    "writeProtection",
    "view",
    "zoom",
    "removePersonalInformation",
    "removeDateAndTime",
    "doNotDisplayPageBoundaries",
    "displayBackgroundShape",
    "printPostScriptOverText",
    "printFractionalCharacterWidth",
    "printFormsData",
    "embedTrueTypeFonts",
    "embedSystemFonts",
    "saveSubsetFonts",
    "saveFormsData",
    "mirrorMargins",
    "alignBordersAndEdges",
    "bordersDoNotSurroundHeader",
    "bordersDoNotSurroundFooter",
    "gutterAtTop",
    "hideSpellingErrors",
    "hideGrammaticalErrors",
    "activeWritingStyle",
    "proofState",
    "formsDesign",
    "attachedTemplate",
    "linkStyles",
    "stylePaneFormatFilter",
    "stylePaneSortMethod",
    "documentType",
    "mailMerge",
    "revisionView",
    "trackRevisions",
    "doNotTrackMoves",
    "doNotTrackFormatting",
    "documentProtection",
    "autoFormatOverride",
    "styleLockTheme",
    "styleLockQFSet",
    "defaultTabStop",
    "autoHyphenation",
    "consecutiveHyphenLimit",
    "hyphenationZone",
    "doNotHyphenateCaps",
    "showEnvelope",
    "summaryLength",
    "clickAndTypeStyle",
    "defaultTableStyle",
    "evenAndOddHeaders",
    "bookFoldRevPrinting",
    "bookFoldPrinting",
    "bookFoldPrintingSheets",
    "drawingGridHorizontalSpacing",
    "drawingGridVerticalSpacing",
    "displayHorizontalDrawingGridEvery",
    "displayVerticalDrawingGridEvery",
    "doNotUseMarginsForDrawingGridOrigin",
    "drawingGridHorizontalOrigin",
    "drawingGridVerticalOrigin",
    "doNotShadeFormData",
    "noPunctuationKerning",
    "characterSpacingControl",
    "printTwoOnOne",
    "strictFirstAndLastChars",
    "noLineBreaksAfter",
    "noLineBreaksBefore",
    "savePreviewPicture",
    "doNotValidateAgainstSchema",
    "saveInvalidXml",
    "ignoreMixedContent",
    "alwaysShowPlaceholderText",
    "doNotDemarcateInvalidXml",
    "saveXmlDataOnly",
    "useXSLTWhenSaving",
    "saveThroughXslt",
    "showXMLTags",
    "alwaysMergeEmptyNamespace",
    "updateFields",
    "hdrShapeDefaults",
    "footnotePr",
    "endnotePr",
    "compat",
    "docVars",
    "rsids",
    "mathPr",
    "attachedSchema",
    "themeFontLang",
    "clrSchemeMapping",
    "doNotIncludeSubdocsInStats",
    "doNotAutoCompressPictures",
    "forceUpgrade",
    "captions",
    "readModeInkLockDown",
    "smartTagType",
    "schemaLibrary",
    "shapeDefaults",
    "doNotEmbedSmartTags",
    "decimalSymbol",
    "listSeparator",
];

/// Document view shown when the document is opened (`w:view`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewType {
    None,
    Print,
    Outline,
    MasterPages,
    Normal,
    Web,
}

impl ViewType {
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Print => "print",
            Self::Outline => "outline",
            Self::MasterPages => "masterPages",
            Self::Normal => "normal",
            Self::Web => "web",
        }
    }

    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "print" => Some(Self::Print),
            "outline" => Some(Self::Outline),
            "masterPages" => Some(Self::MasterPages),
            "normal" => Some(Self::Normal),
            "web" => Some(Self::Web),
            _ => None,
        }
    }
}

/// Preset zoom (`w:zoom/@w:val`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoomType {
    None,
    FullPage,
    BestFit,
    TextFit,
}

impl ZoomType {
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FullPage => "fullPage",
            Self::BestFit => "bestFit",
            Self::TextFit => "textFit",
        }
    }

    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "fullPage" => Some(Self::FullPage),
            "bestFit" => Some(Self::BestFit),
            "textFit" => Some(Self::TextFit),
            _ => None,
        }
    }
}

/// Whether spelling or grammar checking is up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProofingState {
    Clean,
    Dirty,
}

impl ProofingState {
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
        }
    }

    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "clean" => Some(Self::Clean),
            "dirty" => Some(Self::Dirty),
            _ => None,
        }
    }
}

/// Type of document protection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtectionType {
    /// No protection
    None,
    /// No editing allowed
    ReadOnly,
    /// Only comments allowed
    Comments,
    /// Only tracked changes allowed
    TrackedChanges,
    /// Only form fields allowed
    Forms,
}

impl ProtectionType {
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ReadOnly => "readOnly",
            Self::Comments => "comments",
            Self::TrackedChanges => "trackedChanges",
            Self::Forms => "forms",
        }
    }

    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "readOnly" => Some(Self::ReadOnly),
            "comments" => Some(Self::Comments),
            "trackedChanges" => Some(Self::TrackedChanges),
            "forms" => Some(Self::Forms),
            _ => None,
        }
    }
}

/// East Asian punctuation compression (`w:characterSpacingControl`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSpacing {
    DoNotCompress,
    CompressPunctuation,
    CompressPunctuationAndJapaneseKana,
}

impl CharacterSpacing {
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::DoNotCompress => "doNotCompress",
            Self::CompressPunctuation => "compressPunctuation",
            Self::CompressPunctuationAndJapaneseKana => "compressPunctuationAndJapaneseKana",
        }
    }

    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "doNotCompress" => Some(Self::DoNotCompress),
            "compressPunctuation" => Some(Self::CompressPunctuation),
            "compressPunctuationAndJapaneseKana" => Some(Self::CompressPunctuationAndJapaneseKana),
            _ => None,
        }
    }
}

/// Magnification (`w:zoom`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Zoom {
    pub val: Option<ZoomType>,
    pub percent: Option<i64>,
}

impl XmlElement for Zoom {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut zoom = Zoom::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"val" => zoom.val = cursor.parse_value(&attr, ZoomType::from_xml)?,
                b"percent" => {
                    zoom.percent =
                        cursor.parse_value(&attr, |s| s.trim_end_matches('%').parse().ok())?
                },
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(zoom)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:zoom");
        out.opt_attr("w:val", self.val.map(ZoomType::to_xml));
        out.num_attr("w:percent", self.percent);
        out.close_empty();
        Ok(())
    }
}

/// Spelling and grammar state (`w:proofState`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofState {
    pub spelling: Option<ProofingState>,
    pub grammar: Option<ProofingState>,
}

impl XmlElement for ProofState {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut state = ProofState::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"spelling" => state.spelling = cursor.parse_value(&attr, ProofingState::from_xml)?,
                b"grammar" => state.grammar = cursor.parse_value(&attr, ProofingState::from_xml)?,
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(state)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:proofState");
        out.opt_attr("w:spelling", self.spelling.map(ProofingState::to_xml));
        out.opt_attr("w:grammar", self.grammar.map(ProofingState::to_xml));
        out.close_empty();
        Ok(())
    }
}

/// Editing restrictions (`w:documentProtection`).
///
/// Password verifier attributes (`w:hash`, `w:salt`, `w:cryptSpinCount`, ...)
/// are not interpreted. They are kept in `other_attributes` in document
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentProtection {
    pub edit: Option<ProtectionType>,
    pub formatting: Option<OnOff>,
    pub enforcement: Option<OnOff>,
    /// Remaining attributes as (qualified name, value)
    pub other_attributes: Vec<(String, String)>,
}

impl DocumentProtection {
    /// Enforced protection of the given type.
    pub fn enforced(edit: ProtectionType) -> Self {
        Self {
            edit: Some(edit),
            enforcement: Some(OnOff::One),
            ..Self::default()
        }
    }
}

impl XmlElement for DocumentProtection {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut protection = DocumentProtection::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"edit" => protection.edit = cursor.parse_value(&attr, ProtectionType::from_xml)?,
                b"formatting" => protection.formatting = cursor.on_off(&attr)?,
                b"enforcement" => protection.enforcement = cursor.on_off(&attr)?,
                _ => protection.other_attributes.push((
                    String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                    attr_string(&attr),
                )),
            }
        }
        cursor.skip(elem)?;
        Ok(protection)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:documentProtection");
        out.opt_attr("w:edit", self.edit.map(ProtectionType::to_xml));
        out.on_off_attr("w:formatting", self.formatting);
        out.on_off_attr("w:enforcement", self.enforcement);
        for (name, value) in &self.other_attributes {
            out.attr(name, value);
        }
        out.close_empty();
        Ok(())
    }
}

/// A document variable (`w:docVar`), read by `DOCVARIABLE` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocVar {
    pub name: String,
    pub val: String,
}

impl DocVar {
    pub fn new(name: impl Into<String>, val: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            val: val.into(),
        }
    }

    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut var = DocVar::new("", "");
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"name" => var.name = attr_string(&attr),
                b"val" => var.val = attr_string(&attr),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(var)
    }

    fn write(&self, out: &mut XmlWriter) {
        out.open("w:docVar");
        out.attr("w:name", &self.name);
        out.attr("w:val", &self.val);
        out.close_empty();
    }
}

/// Revision save ids (`w:rsids`), as the hex strings written in the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rsids {
    pub root: Option<String>,
    pub rsids: Vec<String>,
}

impl XmlElement for Rsids {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut rsids = Rsids::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"rsidRoot" => rsids.root = cursor.val_string(&child)?,
                b"rsid" => {
                    if let Some(rsid) = cursor.val_string(&child)? {
                        rsids.rsids.push(rsid);
                    }
                },
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(rsids)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if *self == Rsids::default() {
            out.raw("<w:rsids/>");
            return Ok(());
        }
        out.raw("<w:rsids>");
        out.val_element("w:rsidRoot", self.root.as_deref());
        for rsid in &self.rsids {
            out.val_element("w:rsid", Some(rsid));
        }
        out.raw("</w:rsids>");
        Ok(())
    }
}

/// The settings part of a Word document.
///
/// # Examples
///
/// ```
/// use docweave::ooxml::docx::settings::{ProtectionType, Settings};
///
/// let mut settings = Settings::from_xml(concat!(
///     r#"<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
///     r#"<w:zoom w:percent="120"/><w:documentProtection w:edit="forms" w:enforcement="1"/>"#,
///     r#"<w:defaultTabStop w:val="720"/></w:settings>"#
/// ))?;
/// assert!(settings.is_protected());
/// assert_eq!(settings.protection_type(), Some(ProtectionType::Forms));
/// assert_eq!(settings.zoom_percent(), Some(120));
///
/// settings.set_doc_var("Client", "Ada");
/// settings.set_update_fields(true);
/// let xml = settings.to_xml()?;
/// assert!(xml.contains(r#"<w:updateFields/>"#));
/// # Ok::<(), docweave::ooxml::error::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub view: Option<ViewType>,
    pub zoom: Option<Zoom>,
    pub remove_personal_information: Option<Toggle>,
    pub remove_date_and_time: Option<Toggle>,
    pub mirror_margins: Option<Toggle>,
    pub proof_state: Option<ProofState>,
    pub forms_design: Option<Toggle>,
    pub track_revisions: Option<Toggle>,
    pub document_protection: Option<DocumentProtection>,
    /// Default tab interval in twentieths of a point
    pub default_tab_stop: Option<i64>,
    pub auto_hyphenation: Option<Toggle>,
    pub consecutive_hyphen_limit: Option<i64>,
    pub hyphenation_zone: Option<i64>,
    pub do_not_hyphenate_caps: Option<Toggle>,
    pub even_and_odd_headers: Option<Toggle>,
    pub character_spacing_control: Option<CharacterSpacing>,
    /// Ask the application to refresh fields when the document is opened
    pub update_fields: Option<Toggle>,
    pub doc_vars: Vec<DocVar>,
    pub rsids: Option<Rsids>,
    pub decimal_symbol: Option<String>,
    pub list_separator: Option<String>,
    /// Children the model does not type, as markup
    pub other: Vec<String>,
    /// Attributes of the root element (namespace declarations,
    /// `mc:Ignorable`) as (qualified name, value)
    root_attributes: Vec<(String, String)>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the markup of a settings part.
    ///
    /// # Errors
    ///
    /// Returns [`OoxmlError::Xml`] for malformed or truncated markup, and
    /// [`OoxmlError::InvalidFormat`] when the root element is not
    /// `w:settings`.
    pub fn from_xml(xml: impl AsRef<[u8]>) -> Result<Self> {
        Self::from_xml_with_options(xml, ReadOptions::default())
    }

    pub fn from_xml_with_options(xml: impl AsRef<[u8]>, options: ReadOptions) -> Result<Self> {
        let mut cursor = XmlCursor::new(xml.as_ref(), options);
        let root = cursor.root()?;
        if root.local_name().as_ref() != b"settings" {
            return Err(OoxmlError::InvalidFormat(format!(
                "expected a settings root, found {}",
                String::from_utf8_lossy(root.local_name().as_ref())
            )));
        }
        Self::read(&mut cursor, &root)
    }

    /// Encode the settings part, with XML declaration.
    pub fn to_xml(&self) -> Result<String> {
        self.to_xml_with_options(WriteOptions::default())
    }

    pub fn to_xml_with_options(&self, options: WriteOptions) -> Result<String> {
        let mut out = XmlWriter::new(options);
        if out.options().xml_declaration {
            if out.options().standalone {
                out.raw(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
            } else {
                out.raw(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            }
            out.raw("\n");
        }
        self.write(&mut out)?;
        Ok(out.into_string())
    }

    /// Whether editing restrictions are in force.
    ///
    /// A `w:documentProtection` element counts unless its enforcement is
    /// explicitly off or its edit type is `none`.
    pub fn is_protected(&self) -> bool {
        self.document_protection.as_ref().is_some_and(|protection| {
            protection.enforcement.is_none_or(OnOff::is_on)
                && protection.edit != Some(ProtectionType::None)
        })
    }

    #[inline]
    pub fn protection_type(&self) -> Option<ProtectionType> {
        self.document_protection
            .as_ref()
            .and_then(|protection| protection.edit)
    }

    #[inline]
    pub fn is_tracking_revisions(&self) -> bool {
        self.track_revisions.is_some_and(Toggle::is_on)
    }

    #[inline]
    pub fn zoom_percent(&self) -> Option<i64> {
        self.zoom.as_ref().and_then(|zoom| zoom.percent)
    }

    /// Value of a document variable.
    pub fn doc_var(&self, name: &str) -> Option<&str> {
        self.doc_vars
            .iter()
            .find(|var| var.name == name)
            .map(|var| var.val.as_str())
    }

    /// Set a document variable, replacing any value it had.
    pub fn set_doc_var(&mut self, name: &str, val: impl Into<String>) {
        let val = val.into();
        match self.doc_vars.iter_mut().find(|var| var.name == name) {
            Some(var) => var.val = val,
            None => self.doc_vars.push(DocVar::new(name, val)),
        }
    }

    /// Remove a document variable. Returns whether it existed.
    pub fn remove_doc_var(&mut self, name: &str) -> bool {
        let before = self.doc_vars.len();
        self.doc_vars.retain(|var| var.name != name);
        self.doc_vars.len() != before
    }

    /// Ask the application to refresh every field on open, or stop asking.
    pub fn set_update_fields(&mut self, update: bool) {
        self.update_fields = update.then(Toggle::on);
    }

    pub fn set_protection(&mut self, protection: Option<DocumentProtection>) {
        self.document_protection = protection;
    }

    /// Write the typed setting stored under the local name `name`.
    fn write_typed(&self, name: &str, out: &mut XmlWriter) -> Result<()> {
        match name {
            "view" => out.val_element("w:view", self.view.map(ViewType::to_xml)),
            "zoom" => {
                if let Some(zoom) = &self.zoom {
                    zoom.write(out)?;
                }
            },
            "removePersonalInformation" => out.toggle(
                "w:removePersonalInformation",
                self.remove_personal_information.as_ref(),
            ),
            "removeDateAndTime" => {
                out.toggle("w:removeDateAndTime", self.remove_date_and_time.as_ref())
            },
            "mirrorMargins" => out.toggle("w:mirrorMargins", self.mirror_margins.as_ref()),
            "proofState" => {
                if let Some(state) = &self.proof_state {
                    state.write(out)?;
                }
            },
            "formsDesign" => out.toggle("w:formsDesign", self.forms_design.as_ref()),
            "trackRevisions" => out.toggle("w:trackRevisions", self.track_revisions.as_ref()),
            "documentProtection" => {
                if let Some(protection) = &self.document_protection {
                    protection.write(out)?;
                }
            },
            "defaultTabStop" => out.num_element("w:defaultTabStop", self.default_tab_stop),
            "autoHyphenation" => out.toggle("w:autoHyphenation", self.auto_hyphenation.as_ref()),
            "consecutiveHyphenLimit" => {
                out.num_element("w:consecutiveHyphenLimit", self.consecutive_hyphen_limit)
            },
            "hyphenationZone" => out.num_element("w:hyphenationZone", self.hyphenation_zone),
            "doNotHyphenateCaps" => {
                out.toggle("w:doNotHyphenateCaps", self.do_not_hyphenate_caps.as_ref())
            },
            "evenAndOddHeaders" => {
                out.toggle("w:evenAndOddHeaders", self.even_and_odd_headers.as_ref())
            },
            "characterSpacingControl" => out.val_element(
                "w:characterSpacingControl",
                self.character_spacing_control.map(CharacterSpacing::to_xml),
            ),
            "updateFields" => out.toggle("w:updateFields", self.update_fields.as_ref()),
            "docVars" => {
                if !self.doc_vars.is_empty() {
                    out.raw("<w:docVars>");
                    for var in &self.doc_vars {
                        var.write(out);
                    }
                    out.raw("</w:docVars>");
                }
            },
            "rsids" => {
                if let Some(rsids) = &self.rsids {
                    rsids.write(out)?;
                }
            },
            "decimalSymbol" => out.val_element("w:decimalSymbol", self.decimal_symbol.as_deref()),
            "listSeparator" => out.val_element("w:listSeparator", self.list_separator.as_deref()),
            _ => {},
        }
        Ok(())
    }
}

impl XmlElement for Settings {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut settings = Settings {
            root_attributes: elem
                .attributes()
                .map(|attr| {
                    (
                        String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                        attr_string(&attr),
                    )
                })
                .collect(),
            ..Settings::default()
        };
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"view" => settings.view = cursor.val_with(&child, ViewType::from_xml)?,
                b"zoom" => settings.zoom = Some(Zoom::read(cursor, &child)?),
                b"removePersonalInformation" | b"removePersonalInfo" => {
                    settings.remove_personal_information = Some(cursor.toggle(&child)?)
                },
                b"removeDateAndTime" => {
                    settings.remove_date_and_time = Some(cursor.toggle(&child)?)
                },
                b"mirrorMargins" => settings.mirror_margins = Some(cursor.toggle(&child)?),
                b"proofState" => settings.proof_state = Some(ProofState::read(cursor, &child)?),
                b"formsDesign" => settings.forms_design = Some(cursor.toggle(&child)?),
                b"trackRevisions" => settings.track_revisions = Some(cursor.toggle(&child)?),
                b"documentProtection" => {
                    settings.document_protection = Some(DocumentProtection::read(cursor, &child)?)
                },
                b"defaultTabStop" => settings.default_tab_stop = cursor.val_decimal(&child)?,
                b"autoHyphenation" => settings.auto_hyphenation = Some(cursor.toggle(&child)?),
                b"consecutiveHyphenLimit" => {
                    settings.consecutive_hyphen_limit = cursor.val_decimal(&child)?
                },
                b"hyphenationZone" => settings.hyphenation_zone = cursor.val_decimal(&child)?,
                b"doNotHyphenateCaps" => {
                    settings.do_not_hyphenate_caps = Some(cursor.toggle(&child)?)
                },
                b"evenAndOddHeaders" => {
                    settings.even_and_odd_headers = Some(cursor.toggle(&child)?)
                },
                b"characterSpacingControl" => {
                    settings.character_spacing_control =
                        cursor.val_with(&child, CharacterSpacing::from_xml)?
                },
                b"updateFields" => settings.update_fields = Some(cursor.toggle(&child)?),
                b"docVars" => cursor.read_children(&child, |cursor, var| {
                    match var.local_name().as_ref() {
                        b"docVar" => settings.doc_vars.push(DocVar::read(cursor, &var)?),
                        _ => cursor.skip_unknown(&var)?,
                    }
                    Ok(())
                })?,
                b"docVar" => settings.doc_vars.push(DocVar::read(cursor, &child)?),
                b"rsids" => settings.rsids = Some(Rsids::read(cursor, &child)?),
                b"decimalSymbol" => settings.decimal_symbol = cursor.val_string(&child)?,
                b"listSeparator" => settings.list_separator = cursor.val_string(&child)?,
                _ => settings.other.push(cursor.capture(&child)?),
            }
            Ok(())
        })?;
        Ok(settings)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:settings");
        if self.root_attributes.is_empty() {
            for (prefix, uri) in namespace::SETTINGS_DECLARATIONS {
                out.attr(&format!("xmlns:{}", prefix), uri);
            }
            out.attr("mc:Ignorable", namespace::SETTINGS_IGNORABLE);
        } else {
            for (name, value) in &self.root_attributes {
                out.attr(name, value);
            }
        }
        out.close();

        for name in SETTINGS_ORDER {
            self.write_typed(name, out)?;
            for raw in self.other.iter().filter(|raw| element_name(raw) == *name) {
                out.raw(raw);
            }
        }
        // Extension elements (w14:docId, w15:chartTrackingRefBased, ...) follow the schema sequence.
        for raw in &self.other {
            if !SETTINGS_ORDER.contains(&element_name(raw)) {
                out.raw(raw);
            }
        }
        out.end("w:settings");
        Ok(())
    }
}

/// Local name of the element a piece of captured markup starts with.
fn element_name(markup: &str) -> &str {
    let tag = markup.trim_start_matches('<');
    let end = tag
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(tag.len());
    let qualified = &tag[..end];
    qualified.rsplit(':').next().unwrap_or(qualified)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<w:settings xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math" "#,
        r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
        r#"xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml">"#,
        r#"<w:zoom w:percent="100"/>"#,
        r#"<w:proofState w:spelling="clean" w:grammar="dirty"/>"#,
        r#"<w:documentProtection w:edit="readOnly" w:enforcement="0" w:hash="abc=" w:salt="xyz="/>"#,
        r#"<w:defaultTabStop w:val="720"/>"#,
        r#"<w:characterSpacingControl w:val="doNotCompress"/>"#,
        r#"<w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat>"#,
        r#"<w:docVars><w:docVar w:name="Client" w:val="Ada &amp; Co"/></w:docVars>"#,
        r#"<w:rsids><w:rsidRoot w:val="00A1B2C3"/><w:rsid w:val="00A1B2C3"/><w:rsid w:val="00D4E5F6"/></w:rsids>"#,
        r#"<m:mathPr><m:mathFont m:val="Cambria Math"/></m:mathPr>"#,
        r#"<w:decimalSymbol w:val="."/><w:listSeparator w:val=","/>"#,
        r#"<w14:docId w14:val="1A2B3C4D"/>"#,
        r#"</w:settings>"#
    );

    #[test]
    fn test_settings_round_trip() {
        let settings = Settings::from_xml(SETTINGS).unwrap();
        assert_eq!(settings.zoom_percent(), Some(100));
        assert_eq!(
            settings.proof_state,
            Some(ProofState {
                spelling: Some(ProofingState::Clean),
                grammar: Some(ProofingState::Dirty),
            })
        );
        assert_eq!(settings.default_tab_stop, Some(720));
        assert_eq!(settings.doc_var("Client"), Some("Ada & Co"));
        assert_eq!(settings.rsids.as_ref().map(|rsids| rsids.rsids.len()), Some(2));
        assert_eq!(settings.other.len(), 3);
        assert_eq!(settings.to_xml().unwrap(), SETTINGS);
    }

    #[test]
    fn test_protection() {
        let settings = Settings::from_xml(SETTINGS).unwrap();
        assert_eq!(settings.protection_type(), Some(ProtectionType::ReadOnly));
        assert!(!settings.is_protected());
        let protection = settings.document_protection.as_ref().unwrap();
        assert_eq!(
            protection.other_attributes,
            vec![
                ("w:hash".to_string(), "abc=".to_string()),
                ("w:salt".to_string(), "xyz=".to_string()),
            ]
        );

        let mut settings = Settings::new();
        assert!(!settings.is_protected());
        settings.set_protection(Some(DocumentProtection::enforced(ProtectionType::Forms)));
        assert!(settings.is_protected());
        settings.set_protection(Some(DocumentProtection {
            edit: Some(ProtectionType::Comments),
            ..Default::default()
        }));
        assert!(settings.is_protected());
    }

    #[test]
    fn test_new_settings_are_written_in_schema_order() {
        let mut settings = Settings::new();
        settings.list_separator = Some(";".to_string());
        settings.set_update_fields(true);
        settings.set_doc_var("b", "2");
        settings.set_doc_var("a", "1");
        settings.set_doc_var("b", "3");
        settings.track_revisions = Some(Toggle::on());
        settings.view = Some(ViewType::Print);
        settings.other.push(r#"<w:compat/>"#.to_string());

        let xml = settings.to_xml_with_options(WriteOptions::default().fragment()).unwrap();
        assert!(xml.starts_with(r#"<w:settings xmlns:mc=""#));
        assert!(xml.ends_with(concat!(
            r#"<w:view w:val="print"/><w:trackRevisions/><w:updateFields/><w:compat/>"#,
            r#"<w:docVars><w:docVar w:name="b" w:val="3"/><w:docVar w:name="a" w:val="1"/></w:docVars>"#,
            r#"<w:listSeparator w:val=";"/></w:settings>"#
        )));
        assert!(settings.is_tracking_revisions());

        assert!(settings.remove_doc_var("b"));
        assert!(!settings.remove_doc_var("b"));
        settings.set_update_fields(false);
        assert_eq!(settings.update_fields, None);
    }

    #[test]
    fn test_tolerant_decoding() {
        let xml = concat!(
            r#"<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            r#"<w:view w:val="sideways"/><w:zoom w:percent="90%"/><w:removePersonalInfo/>"#,
            r#"<w:docVar w:name="bare" w:val="1"/></w:settings>"#
        );
        let settings = Settings::from_xml(xml).unwrap();
        assert_eq!(settings.view, None);
        assert_eq!(settings.zoom_percent(), Some(90));
        assert_eq!(settings.remove_personal_information, Some(Toggle::on()));
        assert_eq!(settings.doc_var("bare"), Some("1"));
        assert!(
            settings
                .to_xml()
                .unwrap()
                .contains(r#"<w:removePersonalInformation/><w:docVars><w:docVar w:name="bare" w:val="1"/></w:docVars>"#)
        );

        assert!(Settings::from_xml_with_options(xml, ReadOptions::new().strict()).is_err());
    }

    #[test]
    fn test_wrong_root() {
        let err = Settings::from_xml("<w:document/>").unwrap_err();
        assert!(matches!(err, OoxmlError::InvalidFormat(_)));
        let err = Settings::from_xml("<w:settings><w:zoom>").unwrap_err();
        assert!(matches!(err, OoxmlError::Xml(_)));
    }

    #[test]
    fn test_element_name() {
        assert_eq!(element_name(r#"<w:compat><w:x/></w:compat>"#), "compat");
        assert_eq!(element_name(r#"<w14:docId w14:val="1"/>"#), "docId");
        assert_eq!(element_name("<plain/>"), "plain");
    }
}
