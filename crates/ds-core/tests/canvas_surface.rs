//! Integration tests: Canvas surface ↔ snapshot encoding.
//!
//! Verifies that a snapshot carries every object kind, its styling and the
//! background, and that restoring one reproduces the document exactly.

use ds_core::*;
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn populated_canvas() -> Canvas {
    init_logging();
    let mut canvas = Canvas::new(900, 600, Color::parse("#f8f9fa").unwrap());
    canvas.add_object(
        CanvasObject::new(ObjectKind::text(), 100.0, 100.0).with_fill(Color::parse("#333").unwrap()),
    );
    for kind in ShapeKind::ALL {
        let object = CanvasObject::new(ObjectKind::shape(kind), 150.0, 150.0);
        let object = if kind == ShapeKind::Line {
            object.with_stroke(Color::parse("#ff0000").unwrap(), 5.0)
        } else {
            object.with_fill(Color::parse("rgba(0, 128, 255, 0.5)").unwrap())
        };
        canvas.add_object(object);
    }
    canvas.add_object(CanvasObject::new(
        ObjectKind::Image {
            src: "data:image/png;base64,AAAA".into(),
            width: 400,
            height: 300,
            scale: 0.5,
        },
        0.0,
        0.0,
    ));
    canvas
}

#[test]
fn snapshot_restores_every_object_kind() {
    let source = populated_canvas();
    let snapshot = source.serialize();

    let mut target = Canvas::new(10, 10, Color::BLACK);
    target.restore(&snapshot).unwrap();

    assert_eq!(target.document(), source.document());
    assert_eq!(target.serialize(), snapshot);
}

#[test]
fn snapshot_preserves_z_order() {
    let source = populated_canvas();
    let restored = source.serialize().decode().unwrap();
    let kinds: Vec<&str> = restored.objects.iter().map(|o| o.kind.type_name()).collect();
    assert_eq!(
        kinds,
        vec!["text", "rect", "circle", "triangle", "line", "polygon", "image"]
    );
}

#[test]
fn snapshot_json_is_readable() {
    let mut canvas = Canvas::new(900, 600, Color::WHITE);
    canvas.add_object(
        CanvasObject::new(ObjectKind::shape(ShapeKind::Rectangle), 150.0, 150.0)
            .with_fill(Color::parse("#ff0000").unwrap()),
    );
    let value: serde_json::Value = serde_json::from_str(canvas.serialize().as_str()).unwrap();
    assert_eq!(value["background"], "#ffffff");
    assert_eq!(value["objects"][0]["type"], "rect");
    assert_eq!(value["objects"][0]["fill"], "#ff0000");
    assert_eq!(value["objects"][0]["width"], 120.0);
}

#[test]
fn listener_is_replaced_not_stacked() {
    let mut canvas = Canvas::new(100, 100, Color::WHITE);
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));

    let counter = Rc::clone(&first);
    canvas.set_mutation_listener(Box::new(move |_| counter.set(counter.get() + 1)));
    let counter = Rc::clone(&second);
    canvas.set_mutation_listener(Box::new(move |_| counter.set(counter.get() + 1)));

    canvas.add_object(CanvasObject::new(ObjectKind::text(), 0.0, 0.0));
    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
}

#[test]
fn modify_object_notifies_and_updates() {
    let mut canvas = Canvas::new(100, 100, Color::WHITE);
    let object = CanvasObject::new(ObjectKind::shape(ShapeKind::Circle), 0.0, 0.0);
    let id = object.id;
    canvas.add_object(object);

    let notified = Rc::new(Cell::new(None));
    let sink = Rc::clone(&notified);
    canvas.set_mutation_listener(Box::new(move |kind| sink.set(Some(kind))));

    assert!(canvas.modify_object(id, |o| o.left = 42.0));
    assert_eq!(canvas.get(id).unwrap().left, 42.0);
    assert_eq!(notified.get(), Some(MutationKind::Modified(id)));
    assert!(!canvas.modify_object(ObjectId::intern("nope"), |o| o.left = 1.0));
}
