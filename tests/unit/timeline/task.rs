use super::*;

fn volts(v: f64) -> String {
    format!("{v:.0}V")
}

#[test]
fn debug_shows_shape_but_not_closures() {
    let task = ScheduledTask::tween(300.0)
        .label(ElementId(4), 0.0, 20.0, volts)
        .delay(150.0)
        .on_end(|_| {});
    let text = format!("{task:?}");
    assert!(text.starts_with("ScheduledTask"));
    assert!(text.contains("duration_ms: 300.0"));
    assert!(text.contains("delay_ms: 150.0"));
    assert!(text.contains("on_end: true"));
    assert!(text.contains("Label"));

    let frame = format!("{:?}", ScheduledTask::frame(|_| {}));
    assert!(frame.contains("kind: frame"));
    assert!(frame.contains("on_end: false"));
}

#[test]
fn label_targets_keep_their_range() {
    let task = ScheduledTask::tween(100.0).label(ElementId(1), 2.0, 8.0, volts);
    let TaskKind::Tween(tweens) = task.kind() else {
        panic!("expected a tween");
    };
    assert_eq!(tweens.len(), 1);
    assert_eq!(tweens[0].attr, "text");
    match &tweens[0].target {
        TweenTarget::Label { from, to, format } => {
            assert_eq!((*from, *to), (2.0, 8.0));
            assert_eq!(format(12.0), "12V");
        }
        other => panic!("unexpected target {other:?}"),
    }
}

#[test]
fn builders_on_the_wrong_kind_are_ignored() {
    let task = ScheduledTask::once(|_| {}).attr(ElementId(1), "opacity", 1.0);
    assert!(matches!(task.kind(), TaskKind::Once(_)));
    assert_eq!(task.duration_ms(), 0.0);
    assert!(ScheduledTask::tween(f64::NAN).duration_ms() == 0.0);
}
