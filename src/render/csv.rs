//! CSV renderer: one row per session, the 21-column table a labeling shop
//! consumes directly.

use crate::model::Session;

/// Renders `sessions` as a CSV document, sorted by `session_id`. Fiber and
/// notes columns are blank where the session carries no value for them.
pub fn render_csv(sessions: &[Session]) -> String {
    let mut sorted: Vec<&Session> = sessions.iter().collect();
    sorted.sort_by(|a, b| a.session_id.cmp(&b.session_id));

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record([
            "session_id",
            "media",
            "cable_id",
            "cable_type",
            "fiber_kind",
            "polarity_type",
            "src_rack",
            "src_u",
            "src_slot",
            "src_port",
            "src_label",
            "dst_rack",
            "dst_u",
            "dst_slot",
            "dst_port",
            "dst_label",
            "adapter_type",
            "fiber_a",
            "fiber_b",
            "face",
            "notes",
        ])
        .expect("writing a fixed header to an in-memory buffer cannot fail");

    for s in sorted {
        writer
            .write_record([
                s.session_id.as_str(),
                &s.media.to_string(),
                s.cable_id.as_str(),
                &s.cable_type.to_string(),
                &s.fiber_kind.map(|k| k.to_string()).unwrap_or_default(),
                &s.polarity_type.map(|p| p.to_string()).unwrap_or_default(),
                s.src_rack.as_str(),
                &s.src_u.to_string(),
                &s.src_slot.to_string(),
                &s.src_port.to_string(),
                s.label_a.as_str(),
                s.dst_rack.as_str(),
                &s.dst_u.to_string(),
                &s.dst_slot.to_string(),
                &s.dst_port.to_string(),
                s.label_b.as_str(),
                s.adapter_type.as_str(),
                &s.fiber_a.map(|f| f.to_string()).unwrap_or_default(),
                &s.fiber_b.map(|f| f.to_string()).unwrap_or_default(),
                s.face,
                s.notes.as_deref().unwrap_or(""),
            ])
            .expect("writing a fixed-width record to an in-memory buffer cannot fail");
    }

    let bytes = writer
        .into_inner()
        .expect("in-memory buffer flush cannot fail");
    String::from_utf8(bytes).expect("all fields are ASCII or validated UTF-8 strings")
}
