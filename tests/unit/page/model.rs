use super::*;
use serde_json::json;

fn page() -> Page {
    serde_json::from_value(json!({
        "viewport": { "width": 1000, "height": 800 },
        "background": "#ffffff",
        "sections": [
            { "id": "hero", "top": 0, "height": 900, "background": "rgb(12, 12, 12)" },
            { "id": "overlay", "top": 0, "height": 100, "background": "rgba(0, 0, 0, 0)" },
            { "id": "gallery", "top": 900, "height": 1200, "background": "#f4efe8" },
            { "id": "badge", "top": 950, "height": 50, "left": 450, "width": 100,
              "background": "#FF6100", "z": 5 },
            { "id": "footer", "top": 2100, "height": 300, "background": "black" }
        ]
    }))
    .unwrap()
}

#[test]
fn parses_and_validates() {
    let p = page();
    p.validate().unwrap();
    assert_eq!(p.sections.len(), 5);
    assert_eq!(p.sections[3].z, 5);
    assert_eq!(p.document_height(), 2400.0);
}

#[test]
fn later_sections_paint_on_top() {
    let p = page();
    let ids: Vec<&str> = p
        .sections_at(Point::new(500.0, 50.0))
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(ids, vec!["overlay", "hero"]);
}

#[test]
fn z_beats_document_order() {
    let p = page();
    let ids: Vec<&str> = p
        .sections_at(Point::new(500.0, 960.0))
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(ids, vec!["badge", "gallery"]);
    assert!(p.sections_at(Point::new(560.0, 960.0)).len() == 1);
}

#[test]
fn edges_are_half_open() {
    let p = page();
    let at_boundary = p.sections_at(Point::new(10.0, 900.0));
    assert_eq!(at_boundary.len(), 1);
    assert_eq!(at_boundary[0].id, "gallery");
}

#[test]
fn stack_ends_with_page_background() {
    let p = page();
    assert_eq!(
        p.backgrounds_at(Point::new(500.0, 50.0)),
        vec![
            Rgba8::TRANSPARENT,
            Rgba8::rgb(12, 12, 12),
            Rgba8::WHITE
        ]
    );
    assert_eq!(
        p.backgrounds_at(Point::new(500.0, 5000.0)),
        vec![Rgba8::WHITE]
    );
}

#[test]
fn rejects_duplicate_ids_and_bad_geometry() {
    let dup = json!({
        "viewport": { "width": 10, "height": 10 },
        "sections": [
            { "id": "a", "top": 0, "height": 1, "background": "#000" },
            { "id": "a", "top": 1, "height": 1, "background": "#000" }
        ]
    });
    let err = Page::from_json_str(&dup.to_string()).unwrap_err();
    assert!(err.to_string().contains("duplicate"));

    let neg = json!({
        "viewport": { "width": 10, "height": 10 },
        "sections": [ { "id": "a", "top": 0, "height": -1, "background": "#000" } ]
    });
    assert!(Page::from_json_str(&neg.to_string()).is_err());

    let empty_vp = json!({ "viewport": { "width": 0, "height": 10 } });
    assert!(Page::from_json_str(&empty_vp.to_string()).is_err());
}

#[test]
fn bad_color_is_a_serde_error() {
    let bad = json!({
        "viewport": { "width": 10, "height": 10 },
        "sections": [ { "id": "a", "top": 0, "height": 1, "background": "chartreuse" } ]
    });
    let err = Page::from_json_str(&bad.to_string()).unwrap_err();
    assert!(matches!(err, FxError::Serde(_)));
}
