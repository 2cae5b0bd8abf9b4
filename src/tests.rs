use std::sync::Arc;

use crate::prelude::*;

#[test]
fn settings_defaults_fill_missing_fields() {
    let settings = ValidationSettings::from_ron("(layouts: (small_map_threshold: 4))").unwrap();
    assert_eq!(settings.layouts.small_map_threshold, 4);
    assert_eq!(settings.log.level, crate::log::LevelFilter::Info);
    assert!(settings.log.console);

    let empty = ValidationSettings::from_ron("()").unwrap();
    assert_eq!(empty.layouts, LayoutTrackerConfig::default());
}

#[test]
fn settings_round_trip_through_file() {
    let path = std::env::temp_dir().join(format!("ard-validation-{}.ron", std::process::id()));

    let mut settings = ValidationSettings::default();
    settings.log.directory = None;
    settings.log.level = crate::log::LevelFilter::Warn;
    settings.layouts.small_map_threshold = 64;
    settings.save(&path).unwrap();

    let text = settings.to_ron().unwrap();
    let parsed = ValidationSettings::from_ron(&text).unwrap();
    assert_eq!(parsed.layouts, settings.layouts);

    let loaded = ValidationSettings::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.log.directory, None);
    assert_eq!(loaded.log.level, crate::log::LevelFilter::Warn);
    assert_eq!(loaded.layouts.small_map_threshold, 64);
}

#[test]
fn malformed_settings_are_reported() {
    assert!(matches!(
        ValidationSettings::from_ron("(layouts: 12"),
        Err(SettingsError::Parse(_))
    ));
    assert!(matches!(
        ValidationSettings::load("./does/not/exist.ron"),
        Err(SettingsError::Io(_))
    ));
}

/// A secondary recording transitions part of a cube map that the primary already used, then
/// the primary executes it.
#[test]
fn secondary_recording_flow() {
    let settings = ValidationSettings::default();
    let cube = Arc::new(ImageState::new(
        ImageCreateInfo {
            aspects: ImageAspects::COLOR,
            mip_levels: 5,
            array_layers: 6,
            initial_layout: ImageLayout::Undefined,
            debug_name: Some(String::from("cube")),
        },
        &settings.layouts,
    ));
    let sample_view = ImageViewState::new(cube.clone(), &SubresourceRange::all(ImageAspects::COLOR));

    let mut primary = CommandBufferLayouts::new(
        RecordingContext::new(Some(String::from("frame"))),
        settings.layouts,
    );
    let mut secondary = CommandBufferLayouts::new(RecordingContext::new(None), settings.layouts);

    primary.set_layout(
        &cube,
        &SubresourceRange::all(ImageAspects::COLOR),
        ImageLayout::TransferDstOptimal,
        Some(ImageLayout::Undefined),
    );
    secondary.set_initial_layout_from_view(&sample_view, ImageLayout::ShaderReadOnlyOptimal);
    secondary.set_layout(
        &cube,
        &SubresourceRange {
            aspects: ImageAspects::COLOR,
            base_mip_level: 0,
            level_count: 1,
            base_array_layer: 0,
            layer_count: REMAINING_ARRAY_LAYERS,
        },
        ImageLayout::ColorAttachmentOptimal,
        None,
    );

    assert!(primary.execute_commands(&secondary));

    let registry = primary.registry(cube.id()).unwrap();
    // Mip 0 follows the secondary, the rest stays where the primary left it
    assert!(registry.any_in_range(
        &SubresourceRange {
            aspects: ImageAspects::COLOR,
            base_mip_level: 0,
            level_count: 1,
            base_array_layer: 0,
            layer_count: 6,
        },
        |_, entry| entry.current_layout == Some(ImageLayout::ColorAttachmentOptimal)
    ));
    assert!(!registry.any_in_range(
        &SubresourceRange {
            aspects: ImageAspects::COLOR,
            base_mip_level: 1,
            level_count: REMAINING_MIP_LEVELS,
            base_array_layer: 0,
            layer_count: REMAINING_ARRAY_LAYERS,
        },
        |_, entry| entry.current_layout != Some(ImageLayout::TransferDstOptimal)
    ));
    assert!(registry
        .iter()
        .all(|(_, entry)| entry.initial_layout == Some(ImageLayout::Undefined)));
}
