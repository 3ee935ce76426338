use std::collections::HashMap;

use docweave::ooxml::docx::{
    Background, Border, BookmarkStart, Color, Document, DocumentChild, DocumentProtection,
    HeightRule, Hyperlink, Paragraph, ParagraphChild, ProtectionType, ReadOptions, Run, SdtLock,
    SdtType, SectionProperties, Settings, Table, Toggle, WdOrientation,
};
use docweave::ooxml::error::OoxmlError;

const NS: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml" "#,
    r#"xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006""#
);

fn document(body: &str) -> String {
    format!("<w:document {}><w:body>{}</w:body></w:document>", NS, body)
}

fn reencode(doc: &Document) -> Document {
    Document::from_xml(doc.to_xml().unwrap()).unwrap()
}

fn field_paragraph(code: &str, result: &str) -> String {
    format!(
        concat!(
            "<w:p><w:r><w:fldChar w:fldCharType=\"begin\"/>",
            "<w:instrText xml:space=\"preserve\"> {} </w:instrText>",
            "<w:fldChar w:fldCharType=\"separate\"/><w:t>{}</w:t>",
            "<w:fldChar w:fldCharType=\"end\"/></w:r></w:p>"
        ),
        code, result
    )
}

#[test]
fn test_round_trip_with_every_optional_field() {
    let mut doc = Document::new();
    doc.background = Some(Background {
        color: Some("FFFFFF".to_string()),
        theme_color: Some("background1".to_string()),
        theme_tint: Some("F2".to_string()),
        theme_shade: Some("BF".to_string()),
    });

    let para = doc.add_paragraph("Styled");
    para.style("Heading1")
        .justification("both")
        .spacing(Some(120), Some(240))
        .indent(Some(720), Some(360));
    para.properties_mut().keep_next = Some(Toggle::on());
    para.properties_mut().keep_lines = Some(Toggle::from_bool(false));
    para.add_text(" run")
        .bold(true)
        .italic(true)
        .strike(true)
        .underline("double")
        .size(28)
        .color("FF0000")
        .highlight("yellow")
        .font("Calibri")
        .style("Emphasis");
    para.add_bookmark(0, "start");
    para.add_internal_link("back to start", "start").tooltip = Some("Go \"up\"".to_string());

    let table = doc.add_table();
    table.style("TableGrid").borders(Border::single(4));
    let row = table.add_row();
    row.height(400, HeightRule::AtLeast).header(true);
    row.add_cell().width(2400).span(2).add_paragraph("wide");
    table.add_row().add_cell().add_table().add_row().add_cell().add_paragraph("inner");

    doc.add_text_content_control("Customer", "customer", "ACME", true)
        .set_lock(SdtLock::ContentLocked)
        .set_temporary(true);
    doc.add_page_break();

    let mut section = SectionProperties::default();
    section.page_size = Some(docweave::ooxml::docx::PageSize::a4().landscape());
    section.margins = Some(docweave::ooxml::docx::Margins::uniform(1440));
    doc.body_mut()
        .unwrap()
        .children
        .push(DocumentChild::SectionProperties(section));

    let decoded = reencode(&doc);
    assert_eq!(decoded.background, doc.background);
    assert_eq!(decoded.body, doc.body);
    assert_eq!(
        decoded.body().unwrap().section().unwrap().orientation(),
        WdOrientation::Landscape
    );
}

#[test]
fn test_round_trip_with_single_and_no_optional_fields() {
    let mut doc = Document::new();
    doc.add_empty_paragraph();
    doc.add_empty_paragraph().add_run(Run::new());
    doc.add_table().add_row().add_cell();
    doc.add_empty_paragraph().add_text("size only").size(20);
    doc.add_content_control("", "only-tag", SdtType::RichText)
        .properties_mut()
        .alias = None;
    doc.background = Some(Background::with_color("00FF00"));

    let xml = doc.to_xml().unwrap();
    assert!(xml.contains("<w:p/>"));
    assert!(xml.contains("<w:r/>"));
    assert!(xml.contains("<w:tbl><w:tr><w:tc/></w:tr></w:tbl>"));
    assert!(xml.contains(r#"<w:rPr><w:sz w:val="20"/></w:rPr>"#));
    assert!(xml.contains(r#"<w:background w:color="00FF00"/>"#));

    let decoded = reencode(&doc);
    assert_eq!(decoded.body, doc.body);
    assert_eq!(decoded.background, doc.background);
}

#[test]
fn test_unset_fields_emit_nothing() {
    let mut doc = Document::new();
    doc.add_paragraph("plain");
    let r_id = doc.add_hyperlink_relationship("https://example.com");
    doc.add_empty_paragraph().add_link("link", &r_id);
    let mut color = Color::default();
    color.val = Some("auto".to_string());
    doc.add_empty_paragraph().add_text("auto").properties_mut().color = Some(color);

    let xml = doc.to_xml().unwrap();
    assert!(xml.contains("<w:p><w:r><w:t>plain</w:t></w:r></w:p>"));
    assert!(!xml.contains("w:tooltip"));
    assert!(!xml.contains("w:anchor"));
    assert!(!xml.contains("w:themeColor"));
    assert!(!xml.contains("=\"\""));
}

#[test]
fn test_unknown_elements_are_skipped() {
    let xml = document(concat!(
        r#"<w:customXml w:element="invoice"><w:p><w:r><w:t>hidden</w:t></w:r></w:p></w:customXml>"#,
        r#"<w:p w14:paraId="1A2B3C4D"><w:pPr><w:pStyle w:val="Title"/><w:rPr><w:lang w:val="en-US"/></w:rPr></w:pPr>"#,
        r#"<w:r><w:rPr><w:b/><w:noProof/></w:rPr><w:tab/><w:t>kept</w:t><w:lastRenderedPageBreak/></w:r>"#,
        r#"<w:proofErr w:type="spellStart"/><mc:AlternateContent><mc:Choice Requires="w14"><w:r><w:t>x</w:t></w:r></mc:Choice></mc:AlternateContent>"#,
        r#"<w:r><w:t xml:space="preserve"> too</w:t></w:r></w:p>"#,
        r#"<w:altChunk r:id="rId3"/>"#
    ));
    let doc = Document::from_xml(&xml).unwrap();
    let body = doc.body().unwrap();
    assert_eq!(body.children.len(), 1);
    assert_eq!(doc.text(), "kept too");

    let para = body.paragraphs().next().unwrap();
    assert_eq!(para.runs().count(), 2);
    let run = para.runs().next().unwrap();
    assert_eq!(run.properties.as_ref().unwrap().bold, Some(Toggle::on()));
}

#[test]
fn test_single_run_field_substitution() {
    let mut doc = Document::from_xml(document(&field_paragraph("PAGE", "1"))).unwrap();
    let values = HashMap::from([("PAGE".to_string(), "42".to_string())]);
    assert_eq!(doc.replace_fields(&values), 1);
    assert_eq!(doc.text(), "42");
    assert!(doc.to_xml().unwrap().contains("<w:t>42</w:t>"));
}

#[test]
fn test_field_split_over_five_runs() {
    let xml = document(concat!(
        r#"<w:p><w:r><w:t xml:space="preserve">Page </w:t></w:r>"#,
        r#"<w:r><w:fldChar w:fldCharType="begin"/></w:r>"#,
        r#"<w:r><w:instrText xml:space="preserve"> PAGE </w:instrText></w:r>"#,
        r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#,
        r#"<w:r><w:t>1</w:t></w:r>"#,
        r#"<w:r><w:fldChar w:fldCharType="end"/></w:r></w:p>"#
    ));
    let mut doc = Document::from_xml(&xml).unwrap();
    let fields = doc.fields();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].instruction(), "PAGE");
    assert_eq!(fields[0].result(), Some("1"));

    let values = HashMap::from([("PAGE".to_string(), "42".to_string())]);
    assert_eq!(doc.replace_fields(&values), 1);
    assert_eq!(doc.text(), "Page 42");
}

#[test]
fn test_field_without_replacement_is_unchanged() {
    let xml = document(&field_paragraph("NUMPAGES", "3"));
    let mut doc = Document::from_xml(&xml).unwrap();
    let before = doc.clone();
    let values = HashMap::from([("PAGE".to_string(), "42".to_string())]);
    assert_eq!(doc.replace_fields(&values), 0);
    assert_eq!(doc, before);
    assert_eq!(doc.replace_fields(&HashMap::new()), 0);
}

#[test]
fn test_fields_in_nested_containers() {
    let cell_field = field_paragraph("MERGEFIELD City", "«City»");
    let xml = document(&format!(
        concat!(
            "{}",
            "<w:tbl><w:tr><w:tc>{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl></w:tc></w:tr></w:tbl>",
            "<w:sdt><w:sdtPr><w:tag w:val=\"block\"/></w:sdtPr><w:sdtContent>{}</w:sdtContent></w:sdt>",
            "<w:p><w:hyperlink w:anchor=\"x\"><w:r><w:t>link</w:t></w:r></w:hyperlink></w:p>"
        ),
        field_paragraph("MERGEFIELD Name", "«Name»"),
        cell_field,
        cell_field,
        field_paragraph("MERGEFIELD Name", "«Name»"),
    ));
    let mut doc = Document::from_xml(&xml).unwrap();
    let values = HashMap::from([
        ("MERGEFIELD Name".to_string(), "Ada".to_string()),
        ("MERGEFIELD City".to_string(), "London".to_string()),
    ]);
    assert_eq!(doc.replace_fields(&values), 4);
    assert_eq!(doc.text(), "Ada\nLondon\nAda\nlink");
}

#[test]
fn test_search_and_replace_across_formatting() {
    let mut doc = Document::new();
    let para = doc.add_paragraph("Hello ");
    para.add_text("World").bold(true);
    para.add_text("!");
    doc.add_empty_paragraph().add_text("Another World").italic(true);

    assert_eq!(doc.replace_all("World", "Universe"), 2);
    assert_eq!(doc.text(), "Hello Universe!\nAnother Universe");
    // formatting stays on the run that held the match
    let para = doc.body().unwrap().paragraphs().next().unwrap();
    let bold = para.runs().nth(1).unwrap();
    assert_eq!(bold.text(), "Universe");
    assert!(bold.properties.as_ref().unwrap().bold.is_some());
}

#[test]
fn test_search_and_replace_in_nested_tables() {
    let mut doc = Document::new();
    doc.add_paragraph("alpha");
    let table = doc.add_table();
    let cell = table.add_row().add_cell();
    cell.add_paragraph("alpha alpha");
    let inner = cell.add_table();
    inner.add_row().add_cell().add_paragraph("alpha");
    inner.add_row().add_cell().add_table().add_row().add_cell().add_paragraph("alphabet");
    doc.add_text_content_control("", "cc", "alpha", false);
    let mut link = Hyperlink::internal("a", "alpha");
    link.tooltip = Some("alpha".to_string());
    doc.add_empty_paragraph().children.push(ParagraphChild::Hyperlink(link));

    assert_eq!(doc.replace_all("alpha", "beta"), 7);
    assert_eq!(doc.replace_all("alpha", "beta"), 0);
    assert_eq!(doc.replace_all("beta", "gamma"), 7);
}

#[test]
fn test_empty_search_changes_nothing() {
    let mut doc = Document::from_xml(document(&field_paragraph("PAGE", "1"))).unwrap();
    let before = doc.to_xml().unwrap();
    assert_eq!(doc.replace_all("", "anything"), 0);
    assert_eq!(doc.to_xml().unwrap(), before);
}

#[test]
fn test_split_match_is_not_replaced() {
    let xml = document(r#"<w:p><w:r><w:t>{{na</w:t></w:r><w:r><w:t>me}}</w:t></w:r></w:p>"#);
    let mut doc = Document::from_xml(&xml).unwrap();
    assert_eq!(doc.replace_all("{{name}}", "Ada"), 0);
    assert_eq!(doc.text(), "{{name}}");
}

#[test]
fn test_counters_continue_after_decode() {
    let xml = document(concat!(
        r#"<w:p><w:hyperlink r:id="rId9"><w:r><w:t>a</w:t></w:r></w:hyperlink>"#,
        r#"<w:sdt><w:sdtPr><w:id w:val="1170"/><w:text/></w:sdtPr><w:sdtContent><w:r><w:t>b</w:t></w:r></w:sdtContent></w:sdt></w:p>"#
    ));
    let mut doc = Document::from_xml(&xml).unwrap();
    let r_id = doc.add_hyperlink_relationship("https://example.com");
    assert_eq!(r_id, "rId10");
    assert_eq!(doc.next_relationship_id(), "rId11");
    assert_eq!(doc.add_checkbox_content_control("", "", true).id(), Some(1171));
    assert_eq!(doc.next_content_control_id(), 1172);

    let relationships = doc.relationships();
    assert_eq!(relationships.len(), 1);
    let rel = relationships.iter().next().unwrap();
    assert_eq!(rel.r_id(), "rId10");
    assert!(rel.is_external());
    assert!(relationships.to_xml().contains(r#"TargetMode="External""#));
}

#[test]
fn test_package_relationships_are_never_reminted() {
    let xml = document(concat!(
        r#"<w:p><w:hyperlink r:id="rId4"><w:r><w:t>a</w:t></w:r></w:hyperlink></w:p>"#,
        r#"<w:altChunk r:id="rId6"/>"#
    ));
    let package_rels = ["rId1", "rId2", "rId3", "rId4", "rId5", "rId6", "rId7", "rId8"];
    let mut doc = Document::from_xml(&xml).unwrap();
    assert_eq!(doc.next_relationship_id(), "rId7");

    let mut doc = Document::from_xml(&xml).unwrap();
    doc.observe_relationships(package_rels);
    let minted = doc.add_image_relationship("media/image1.png");
    assert!(!package_rels.contains(&minted.as_str()));
    assert_eq!(minted, "rId9");
}

#[test]
fn test_settings_part_alongside_document() {
    let settings_xml = concat!(
        r#"<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
        r#"<w:trackRevisions/><w:defaultTabStop w:val="708"/><w:compat><w:compatSetting w:name="compatibilityMode" w:val="15"/></w:compat>"#,
        r#"</w:settings>"#
    );
    let mut settings = Settings::from_xml(settings_xml).unwrap();
    assert!(settings.is_tracking_revisions());
    assert!(!settings.is_protected());

    let mut doc = Document::from_xml(document(&field_paragraph("DOCVARIABLE Client", "x"))).unwrap();
    let values = HashMap::from([("DOCVARIABLE Client".to_string(), "Ada".to_string())]);
    settings.set_doc_var("Client", "Ada");
    settings.set_update_fields(true);
    settings.set_protection(Some(DocumentProtection::enforced(ProtectionType::Forms)));
    assert_eq!(doc.replace_fields(&values), 1);

    let decoded = Settings::from_xml(settings.to_xml().unwrap()).unwrap();
    assert_eq!(decoded, settings);
    assert_eq!(decoded.doc_var("Client"), Some("Ada"));
    assert_eq!(decoded.protection_type(), Some(ProtectionType::Forms));
    assert_eq!(decoded.other.len(), 1);
    assert_eq!(doc.text(), "Ada");
}

#[test]
fn test_special_characters_survive() {
    let mut doc = Document::new();
    doc.add_paragraph(r#"5 < 6 & "quotes" 'apos' > 4"#);
    let para = doc.add_empty_paragraph();
    para.children.push(ParagraphChild::BookmarkStart(BookmarkStart::new(
        3,
        "a&b<c>\"d\"",
    )));

    let xml = doc.to_xml().unwrap();
    assert!(xml.contains("5 &lt; 6 &amp;"));
    assert!(xml.contains(r#"w:name="a&amp;b&lt;c&gt;&quot;d&quot;""#));
    let decoded = Document::from_xml(&xml).unwrap();
    assert_eq!(decoded.body, doc.body);

    let raw = document(r#"<w:p><w:r><w:t>caf&#233; &#x2013; &lt;ok&gt;</w:t></w:r></w:p>"#);
    assert_eq!(Document::from_xml(&raw).unwrap().text(), "café – <ok>");
}

#[test]
fn test_malformed_input_is_an_error() {
    let truncated = format!("<w:document {}><w:body>", NS);
    assert!(matches!(
        Document::from_xml(&truncated),
        Err(OoxmlError::Xml(_))
    ));
    let mismatched = document("<w:p><w:r></w:p>");
    assert!(matches!(
        Document::from_xml(&mismatched),
        Err(OoxmlError::Xml(_))
    ));
    assert!(matches!(
        Document::from_xml(""),
        Err(OoxmlError::Xml(_))
    ));
    assert!(matches!(
        Document::from_xml(format!("<w:styles {}/>", NS)),
        Err(OoxmlError::InvalidFormat(_))
    ));
}

#[test]
fn test_strict_mode_rejects_bad_values() {
    let xml = document(r#"<w:p><w:r><w:rPr><w:sz w:val="large"/></w:rPr><w:t>x</w:t></w:r></w:p>"#);

    let lenient = Document::from_xml(&xml).unwrap();
    let para = lenient.body().unwrap().paragraphs().next().unwrap();
    let run = para.runs().next().unwrap();
    assert_eq!(run.properties.as_ref().unwrap().size, None);

    let strict = Document::from_xml_with_options(&xml, ReadOptions::new().strict());
    assert!(matches!(strict, Err(OoxmlError::InvalidFormat(_))));
}

#[test]
fn test_crate_error_wraps_document_errors() {
    fn load(xml: &str) -> docweave::Result<Document> {
        Ok(Document::from_xml(xml)?)
    }
    assert!(load("<w:document/>").is_ok());
    let err = load("<w:document>").unwrap_err();
    assert!(err.to_string().contains("unexpected end of input"));
}

#[test]
fn test_builders_from_scratch() {
    let mut doc = Document::new();
    let mut table = Table::with_grid(&[3000, 3000]);
    let row = table.add_row();
    row.add_cell().add_paragraph("Name");
    row.add_cell().add_paragraph("Qty");
    doc.body_mut().unwrap().children.push(DocumentChild::Table(table));
    doc.add_paragraph("after");
    let mut extra = Paragraph::with_text("pushed");
    extra.add_page_break();
    doc.body_mut().unwrap().children.push(DocumentChild::Paragraph(extra));

    assert_eq!(doc.text(), "Name\tQty\nafter\npushed");
    let decoded = reencode(&doc);
    assert_eq!(decoded.body().unwrap().tables().next().unwrap().column_count(), 2);
}
