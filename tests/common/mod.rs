#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

const LEADING: i64 = 14;

/// Build a PDF with one page per entry; each string is drawn in its own text block.
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let pages = pages
        .iter()
        .map(|lines| {
            lines
                .iter()
                .enumerate()
                .flat_map(|(i, line)| {
                    vec![
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec!["F1".into(), 12.into()]),
                        Operation::new("Td", vec![72.into(), (720 - 20 * i as i64).into()]),
                        Operation::new("Tj", vec![Object::string_literal(*line)]),
                        Operation::new("ET", vec![]),
                    ]
                })
                .collect()
        })
        .collect();

    build_pdf_from_operations(pages)
}

/// One text block per page; lines after the first start with `T*`.
pub fn build_pdf_next_line(pages: &[&[&str]]) -> Vec<u8> {
    build_single_block(pages, |line, first| {
        if first {
            vec![Operation::new("Tj", vec![Object::string_literal(line)])]
        } else {
            vec![
                Operation::new("T*", vec![]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
            ]
        }
    })
}

/// One text block per page; every line is drawn with the `'` operator.
pub fn build_pdf_quote_operator(pages: &[&[&str]]) -> Vec<u8> {
    build_single_block(pages, |line, _| {
        vec![Operation::new("'", vec![Object::string_literal(line)])]
    })
}

fn build_single_block(
    pages: &[&[&str]],
    draw_line: impl Fn(&str, bool) -> Vec<Operation>,
) -> Vec<u8> {
    let pages = pages
        .iter()
        .map(|lines| {
            let mut operations = vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("TL", vec![LEADING.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
            ];
            for (i, line) in lines.iter().enumerate() {
                operations.extend(draw_line(line, i == 0));
            }
            operations.push(Operation::new("ET", vec![]));
            operations
        })
        .collect();

    build_pdf_from_operations(pages)
}

pub fn build_pdf_from_operations(pages: Vec<Vec<Operation>>) -> Vec<u8> {
    assemble(pages.len(), |doc, index| {
        let content = Content {
            operations: pages[index].clone(),
        };
        doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()))
    })
}

/// A single page whose `Contents` points at an integer instead of a stream
pub fn build_pdf_with_broken_contents() -> Vec<u8> {
    assemble(1, |doc, _| doc.add_object(Object::Integer(42)))
}

fn assemble(page_count: usize, mut contents: impl FnMut(&mut Document, usize) -> ObjectId) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for index in 0..page_count {
        let content_id = contents(&mut doc, index);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::from(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Five sheets; only the third states a scale
pub fn title_block_set() -> Vec<u8> {
    build_pdf(&[
        &["COVER SHEET", "PROJECT: WAREHOUSE FIT-OUT"],
        &["E-100 SITE PLAN", "NORTH"],
        &["E-101 LIGHTING PLAN", "Scale: 1/4\" = 1'-0\"", "DRAWN BY: JD"],
        &["E-102 POWER PLAN", "SEE NOTES"],
        &["E-501 DETAILS"],
    ])
}
