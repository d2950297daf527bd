use std::io::Cursor;

use super::*;
use crate::{foundation::core::PersonId, plan::builder::{PlanNode, StyleTag}};

fn png_data_url(px: [u8; 4]) -> String {
    let img = image::RgbaImage::from_pixel(2, 3, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    format!("data:image/png;base64,{}", BASE64_STANDARD.encode(buf))
}

fn node(id: i64, photo: Option<String>) -> PlanNode {
    PlanNode {
        id: PersonId(id),
        lines: vec![format!("p{id}")],
        x: 0.0,
        y: 0.0,
        style_tag: StyleTag::Person,
        photo,
        stock: false,
    }
}

#[test]
fn decodes_png_data_urls() {
    let img = decode_photo(&png_data_url([255, 0, 0, 255])).unwrap().unwrap();
    assert_eq!((img.width, img.height), (2, 3));
    assert_eq!(&img.rgba8_premul[0..4], &[255, 0, 0, 255]);
}

#[test]
fn tolerates_wrapped_payloads() {
    let url = png_data_url([0, 0, 255, 255]);
    let (head, body) = url.split_at(40);
    let wrapped = format!("{head}\n{body}");
    assert!(decode_photo(&wrapped).unwrap().is_some());
}

#[test]
fn plain_paths_are_not_resolved() {
    assert_eq!(decode_photo("photos/ada.jpg").unwrap(), None);
}

#[test]
fn broken_data_urls_are_errors() {
    assert!(decode_photo("data:image/png;base64").is_err());
    assert!(decode_photo("data:text/plain;base64,aGk=").is_err());
    assert!(decode_photo("data:image/png;base64,!!!").is_err());
}

#[test]
fn store_decodes_each_reference_once_and_skips_failures() {
    let url = png_data_url([0, 255, 0, 255]);
    let plan = DrawingPlan {
        nodes: vec![
            node(1, Some(url.clone())),
            node(2, Some(url.clone())),
            node(3, Some("data:image/png;base64,AAAA".into())),
            node(4, None),
        ],
        ..DrawingPlan::default()
    };
    let store = PhotoStore::prepare(&plan);
    assert_eq!(store.len(), 1);
    assert!(store.get(&url).is_some());
}
