//! Benchmarks for docshapes.
//!
//! Run with: cargo bench
//!
//! These benchmarks measure loading and shape indexing at various document sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Cursor;

/// Creates a synthetic DOCX with `shape_count` inline drawings, alternating
/// pictures and charts, each in its own paragraph between text paragraphs.
fn create_test_docx(shape_count: usize) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    // [Content_Types].xml
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#,
    )
    .unwrap();

    // _rels/.rels
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#,
    )
    .unwrap();

    // word/_rels/document.xml.rels
    zip.start_file("word/_rels/document.xml.rels", options)
        .unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart" Target="charts/chart1.xml"/>
</Relationships>"#,
    )
    .unwrap();

    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <w:body>"#,
    );

    for i in 0..shape_count {
        let graphic = if i % 2 == 0 {
            r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic><pic:blipFill><a:blip r:embed="rId1"/></pic:blipFill></pic:pic></a:graphicData>"#
        } else {
            r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:chart r:id="rId2"/></a:graphicData>"#
        };
        content.push_str(&format!(
            r#"
    <w:p><w:r><w:t>Paragraph {i} before a drawing.</w:t></w:r></w:p>
    <w:p><w:r><w:drawing><wp:inline><wp:extent cx="914400" cy="914400"/><wp:docPr id="{id}" name="Shape {id}"/><a:graphic>{graphic}</a:graphic></wp:inline></w:drawing></w:r></w:p>"#,
            i = i,
            id = i + 1,
            graphic = graphic
        ));
    }

    content.push_str(
        r#"
    <w:sectPr/>
  </w:body>
</w:document>"#,
    );

    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(content.as_bytes()).unwrap();

    zip.finish().unwrap();
    buffer
}

/// Benchmark opening a document at various sizes.
fn bench_document_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_open");

    for shape_count in [10, 100, 500, 1000].iter() {
        let data = create_test_docx(*shape_count);
        let size = data.len() as u64;

        group.throughput(Throughput::Bytes(size));
        group.bench_with_input(BenchmarkId::new("shapes", shape_count), &data, |b, data| {
            b.iter(|| {
                let _ = docshapes::Document::from_bytes(black_box(data.clone()));
            });
        });
    }

    group.finish();
}

/// Benchmark indexing and classifying the inline shapes of a parsed document.
fn bench_inline_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline_shapes");

    for shape_count in [10, 100, 500, 1000].iter() {
        let data = create_test_docx(*shape_count);
        let document = docshapes::Document::from_bytes(data).unwrap();

        group.throughput(Throughput::Elements(*shape_count as u64));
        group.bench_with_input(
            BenchmarkId::new("shapes", shape_count),
            &document,
            |b, doc| {
                b.iter(|| {
                    let shapes = black_box(doc).inline_shapes();
                    black_box(shapes.len());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_document_open, bench_inline_shapes);
criterion_main!(benches);
