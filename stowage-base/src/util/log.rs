/// Log targets whose messages are produced once per pointer event or frame.
const PER_FRAME_TARGETS: &[&str] = &["stowage::pointer", "stowage::highlight"];

/// Provides the recommended log filter for hosts which want to exclude the per-frame
/// details of stowage’s pointer mapping and highlight feedback.
///
/// The guiding principle for this filtering is that at [`log::Level::Debug`] or lower level,
/// there should be no messages produced every frame/pointer event unless something is wrong.
/// Messages from those modules at [`log::Level::Debug`] or more severe are still accepted.
#[allow(clippy::missing_inline_in_public_items)]
pub fn standard_filter(metadata: &log::Metadata<'_>) -> bool {
    let target = metadata.target();

    let per_frame = PER_FRAME_TARGETS
        .iter()
        .any(|prefix| target.starts_with(prefix));

    !per_frame || metadata.level() <= log::Level::Debug
}
