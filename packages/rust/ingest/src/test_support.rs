//! In-memory document builders for tests.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

/// Build a PDF with one page per entry; an empty entry produces a page with no text.
pub(crate) fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let pages = pages.iter().map(|text| text_operations(text)).collect();
    build_pdf(courier_font(), pages)
}

/// A one-page PDF whose font dictionary has no `/Type`, which trips an
/// internal assertion in lopdf's text extraction.
pub(crate) fn pdf_with_untyped_font(text: &str) -> Vec<u8> {
    let mut font = courier_font();
    font.remove(b"Type");
    build_pdf(font, vec![text_operations(text)])
}

/// A one-page PDF whose `Tf` operator has a number where the font name belongs.
pub(crate) fn pdf_with_bad_font_operand() -> Vec<u8> {
    let operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![24.into(), 24.into()]),
        Operation::new("Tj", vec![Object::string_literal("unreachable")]),
        Operation::new("ET", vec![]),
    ];
    build_pdf(courier_font(), vec![operations])
}

fn courier_font() -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    }
}

fn text_operations(text: &str) -> Vec<Operation> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 24.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

fn build_pdf(font: Dictionary, pages: Vec<Vec<Operation>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(font);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

/// Build a DOCX whose body holds one paragraph per entry.
pub(crate) fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = Docx::new();
    for text in paragraphs {
        let mut paragraph = Paragraph::new();
        if !text.is_empty() {
            paragraph = paragraph.add_run(Run::new().add_text(*text));
        }
        docx = docx.add_paragraph(paragraph);
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).expect("pack docx");
    cursor.into_inner()
}
