//! Shared fixtures for the integration tests.
//!
//! Packages are assembled in memory so the suites need no files on disk.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const EXTERNAL_LOGO: &str = "http://example.com/logo.png";

/// A PNG of the given size filled with one grey level.
pub fn png(width: u32, height: u32, shade: u8) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image::RgbImage::from_pixel(width, height, image::Rgb([shade, shade, shade]))
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// Image stored as `word/media/image1.png` in the five-shape fixture.
pub fn fixture_image1() -> Vec<u8> {
    png(64, 32, 10)
}

/// Image stored as `word/media/image2.png` in the five-shape fixture.
pub fn fixture_image2() -> Vec<u8> {
    png(16, 16, 200)
}

/// Build a package from its parts.
pub fn build_package(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, data) in parts {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="png" ContentType="image/png"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

pub const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="http://example.com/logo.png" TargetMode="External"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image2.png"/>
  <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/diagramData" Target="diagrams/data1.xml"/>
  <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart" Target="charts/chart1.xml"/>
</Relationships>"#;

fn inline(id: u32, name: &str, cx: i64, cy: i64, graphic_data: &str) -> String {
    format!(
        r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{id}" name="{name}"/><a:graphic>{graphic_data}</a:graphic></wp:inline></w:drawing>"#
    )
}

fn picture(blip: &str) -> String {
    format!(
        r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic><pic:nvPicPr><pic:cNvPr id="0" name="image.png"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip {blip}/><a:stretch><a:fillRect/></a:stretch></pic:blipFill></pic:pic></a:graphicData>"#
    )
}

/// `word/document.xml` of the five-shape fixture.
///
/// In order: embedded picture, linked picture, picture with both embed and
/// link, SmartArt, chart. A floating `wp:anchor` drawing and an inline
/// inside `mc:Fallback` sit between them and are not inline shapes.
pub fn five_shape_document_xml() -> String {
    let shapes = [
        inline(1, "Picture 1", 914_400, 457_200, &picture(r#"r:embed="rId1""#)),
        inline(2, "Picture 2", 914_400, 914_400, &picture(r#"r:link="rId2""#)),
        inline(3, "Picture 3", 457_200, 457_200, &picture(r#"r:embed="rId3" r:link="rId2""#)),
        inline(
            4,
            "Diagram 4",
            5_486_400,
            3_200_400,
            r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/diagram"><dgm:relIds r:dm="rId4" r:lo="rId6" r:qs="rId7" r:cs="rId8"/></a:graphicData>"#,
        ),
        inline(
            5,
            "Chart 5",
            5_486_400,
            3_200_400,
            r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:chart r:id="rId5"/></a:graphicData>"#,
        ),
    ];

    let anchored = r#"<w:drawing><wp:anchor behindDoc="0"><wp:extent cx="10" cy="10"/><wp:docPr id="6" name="Floating"/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"/></a:graphic></wp:anchor></w:drawing>"#;
    let fallback = format!(
        r#"<mc:AlternateContent><mc:Choice Requires="wps">{}</mc:Choice><mc:Fallback>{}</mc:Fallback></mc:AlternateContent>"#,
        anchored,
        inline(7, "Fallback", 10, 10, &picture(r#"r:embed="rId1""#))
    );

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" xmlns:dgm="http://schemas.openxmlformats.org/drawingml/2006/diagram" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006">
  <w:body>
    <w:p><w:r><w:t xml:space="preserve">Shapes below </w:t></w:r></w:p>
    <w:p><w:r>{s0}</w:r><w:r>{s1}</w:r></w:p>
    <w:p><w:r>{anchored}</w:r></w:p>
    <w:p><w:r>{s2}</w:r></w:p>
    <w:p><w:r>{fallback}</w:r></w:p>
    <w:tbl><w:tr><w:tc><w:p><w:r>{s3}</w:r></w:p></w:tc></w:tr></w:tbl>
    <w:p><w:r>{s4}</w:r></w:p>
    <w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>
  </w:body>
</w:document>"#,
        s0 = shapes[0],
        s1 = shapes[1],
        s2 = shapes[2],
        s3 = shapes[3],
        s4 = shapes[4],
        anchored = anchored,
        fallback = fallback,
    )
}

/// The five-shape fixture package.
pub fn five_shape_docx() -> Vec<u8> {
    fixture_package(&five_shape_document_xml(), DOCUMENT_RELS)
}

/// The fixture's parts around a given main document and its relationships.
pub fn fixture_package(document: &str, document_rels: &str) -> Vec<u8> {
    let image1 = fixture_image1();
    let image2 = fixture_image2();
    build_package(&[
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes()),
        ("word/document.xml", document.as_bytes()),
        ("word/_rels/document.xml.rels", document_rels.as_bytes()),
        ("word/media/image1.png", image1.as_slice()),
        ("word/media/image2.png", image2.as_slice()),
        ("word/diagrams/data1.xml", b"<dgm:dataModel/>".as_slice()),
        ("word/charts/chart1.xml", b"<c:chartSpace/>".as_slice()),
    ])
}

/// The five-shape document with WordprocessingML bound to `w0` and
/// relationships bound to `rel`. Same namespaces, different prefixes.
pub fn renamed_prefix_document_xml() -> String {
    five_shape_document_xml()
        .replace("<w:", "<w0:")
        .replace("</w:", "</w0:")
        .replace(" w:", " w0:")
        .replace("xmlns:w=", "xmlns:w0=")
        .replace(" r:", " rel:")
        .replace("xmlns:r=", "xmlns:rel=")
}

/// A workbook package, which is not a Word document.
pub fn xlsx_package() -> Vec<u8> {
    build_package(&[
        (
            "[Content_Types].xml",
            br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#
                .as_slice(),
        ),
        ("xl/workbook.xml", b"<workbook/>".as_slice()),
    ])
}
