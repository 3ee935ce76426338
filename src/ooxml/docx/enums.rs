/// Enumerations for Word document elements.
///
/// Each enumeration maps a closed XML vocabulary to a Rust type. Values
/// outside the vocabulary are treated like any other unparseable value: the
/// field is left unset.
use std::fmt;

/// Specifies the page layout orientation.
///
/// Corresponds to the VBA `WdOrientation` enumeration.
///
/// # Examples
///
/// ```rust
/// use docweave::ooxml::docx::enums::WdOrientation;
///
/// let orientation = WdOrientation::Landscape;
/// assert_eq!(orientation.to_xml(), "landscape");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WdOrientation {
    /// Portrait orientation.
    Portrait = 0,
    /// Landscape orientation.
    Landscape = 1,
}

impl WdOrientation {
    /// Convert the orientation to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Parse orientation from XML attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "portrait" => Some(Self::Portrait),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }
}

impl fmt::Display for WdOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "Portrait"),
            Self::Landscape => write!(f, "Landscape"),
        }
    }
}

/// Specifies the start type of a section break.
///
/// Corresponds to the VBA `WdSectionStart` enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WdSectionStart {
    /// Continuous section break.
    Continuous = 0,
    /// New column section break.
    NewColumn = 1,
    /// New page section break.
    NewPage = 2,
    /// Even pages section break.
    EvenPage = 3,
    /// Section begins on next odd page.
    OddPage = 4,
}

impl WdSectionStart {
    /// Convert the section start type to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::NewColumn => "nextColumn",
            Self::NewPage => "nextPage",
            Self::EvenPage => "evenPage",
            Self::OddPage => "oddPage",
        }
    }

    /// Parse section start type from XML attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "continuous" => Some(Self::Continuous),
            "nextColumn" => Some(Self::NewColumn),
            "nextPage" => Some(Self::NewPage),
            "evenPage" => Some(Self::EvenPage),
            "oddPage" => Some(Self::OddPage),
            _ => None,
        }
    }
}

impl fmt::Display for WdSectionStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continuous => write!(f, "Continuous"),
            Self::NewColumn => write!(f, "New Column"),
            Self::NewPage => write!(f, "New Page"),
            Self::EvenPage => write!(f, "Even Page"),
            Self::OddPage => write!(f, "Odd Page"),
        }
    }
}

/// Specifies one of the three possible header/footer definitions for a section.
///
/// Corresponds to the VBA `WdHeaderFooterIndex` enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WdHeaderFooter {
    /// Header/footer for odd pages or all pages if no even header/footer.
    Primary = 1,
    /// Header/footer for first page of section.
    FirstPage = 2,
    /// Header/footer for even pages of recto/verso section.
    EvenPage = 3,
}

impl WdHeaderFooter {
    /// Convert the header/footer index to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Primary => "default",
            Self::FirstPage => "first",
            Self::EvenPage => "even",
        }
    }

    /// Parse header/footer index from XML attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Primary),
            "first" => Some(Self::FirstPage),
            "even" => Some(Self::EvenPage),
            _ => None,
        }
    }
}

/// Role of a `w:fldChar` within a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCharType {
    /// Starts the field; instruction text follows.
    Begin,
    /// Ends the instruction; the current result follows.
    Separate,
    /// Ends the field.
    End,
}

impl FieldCharType {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::Separate => "separate",
            Self::End => "end",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "begin" => Some(Self::Begin),
            "separate" => Some(Self::Separate),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// Locking applied to a content control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdtLock {
    /// The control cannot be deleted.
    SdtLocked,
    /// The contents cannot be edited.
    ContentLocked,
    /// No locking.
    Unlocked,
    /// Neither the control nor its contents can be changed.
    SdtContentLocked,
}

impl SdtLock {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::SdtLocked => "sdtLocked",
            Self::ContentLocked => "contentLocked",
            Self::Unlocked => "unlocked",
            Self::SdtContentLocked => "sdtContentLocked",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "sdtLocked" => Some(Self::SdtLocked),
            "contentLocked" => Some(Self::ContentLocked),
            "unlocked" => Some(Self::Unlocked),
            "sdtContentLocked" => Some(Self::SdtContentLocked),
            _ => None,
        }
    }

    /// Whether the control itself is protected from deletion.
    #[inline]
    pub const fn locks_control(self) -> bool {
        matches!(self, Self::SdtLocked | Self::SdtContentLocked)
    }

    /// Whether the contents are protected from editing.
    #[inline]
    pub const fn locks_content(self) -> bool {
        matches!(self, Self::ContentLocked | Self::SdtContentLocked)
    }
}

impl fmt::Display for SdtLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_xml())
    }
}

/// Kind of `w:br`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakType {
    Page,
    Column,
    TextWrapping,
}

impl BreakType {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Column => "column",
            Self::TextWrapping => "textWrapping",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "page" => Some(Self::Page),
            "column" => Some(Self::Column),
            "textWrapping" => Some(Self::TextWrapping),
            _ => None,
        }
    }
}

/// Where text resumes after a text-wrapping break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakClear {
    None,
    Left,
    Right,
    All,
}

impl BreakClear {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Left => "left",
            Self::Right => "right",
            Self::All => "all",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

/// Interpretation of `w:spacing/@w:line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineSpacingRule {
    /// In 240ths of a line.
    Auto,
    /// Exact height in twips.
    Exact,
    /// Minimum height in twips.
    AtLeast,
}

impl LineSpacingRule {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Exact => "exact",
            Self::AtLeast => "atLeast",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "exact" => Some(Self::Exact),
            "atLeast" => Some(Self::AtLeast),
            _ => None,
        }
    }
}

/// Interpretation of `w:trHeight/@w:val`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeightRule {
    Auto,
    Exact,
    AtLeast,
}

impl HeightRule {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Exact => "exact",
            Self::AtLeast => "atLeast",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "exact" => Some(Self::Exact),
            "atLeast" => Some(Self::AtLeast),
            _ => None,
        }
    }
}

/// Vertical merge state of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VMergeType {
    /// Starts a merged region.
    Restart,
    /// Continues the region started above.
    Continue,
}

impl VMergeType {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::Continue => "continue",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "restart" => Some(Self::Restart),
            "continue" => Some(Self::Continue),
            _ => None,
        }
    }
}

/// Vertical alignment of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellVerticalAlign {
    Top,
    Center,
    Bottom,
    Both,
}

impl CellVerticalAlign {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
            Self::Both => "both",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Table layout algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableLayoutType {
    Fixed,
    Autofit,
}

impl TableLayoutType {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Autofit => "autofit",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "fixed" => Some(Self::Fixed),
            "autofit" => Some(Self::Autofit),
            _ => None,
        }
    }
}

/// Superscript/subscript position of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlignRun {
    Baseline,
    Superscript,
    Subscript,
}

impl VerticalAlignRun {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Superscript => "superscript",
            Self::Subscript => "subscript",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "baseline" => Some(Self::Baseline),
            "superscript" => Some(Self::Superscript),
            "subscript" => Some(Self::Subscript),
            _ => None,
        }
    }
}

/// Placement of an annotation marker displaced by custom XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplacedByCustomXml {
    Next,
    Prev,
}

impl DisplacedByCustomXml {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "next" => Some(Self::Next),
            "prev" => Some(Self::Prev),
            _ => None,
        }
    }
}

/// Kind of a text form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextFormFieldType {
    Regular,
    Number,
    Date,
    CurrentTime,
    CurrentDate,
    Calculated,
}

impl TextFormFieldType {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Number => "number",
            Self::Date => "date",
            Self::CurrentTime => "currentTime",
            Self::CurrentDate => "currentDate",
            Self::Calculated => "calculated",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "regular" => Some(Self::Regular),
            "number" => Some(Self::Number),
            "date" => Some(Self::Date),
            "currentTime" => Some(Self::CurrentTime),
            "currentDate" => Some(Self::CurrentDate),
            "calculated" => Some(Self::Calculated),
            _ => None,
        }
    }
}

/// Source of a form field's help or status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoTextType {
    /// Literal text.
    Text,
    /// Name of an AutoText entry.
    AutoText,
}

impl InfoTextType {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::AutoText => "autoText",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "autoText" => Some(Self::AutoText),
            _ => None,
        }
    }
}
