//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Panorama Configuration
# Only override what you want to change -- missing fields use defaults.

[registry]
# Ticks without a heartbeat before a surface is dropped (2-3600).
# At 60 ticks per second the default prunes a closed window after ~1s.
# stale_after_ticks = 60
# Every window sharing a scene must use the same prefix.
# key_prefix = "panorama/surface/"

[scene]
# max_planes = 4          # 1-16
# falloff = 0.05          # (0.0, 1.0]
# gather_threshold = 50.0
# plane_size = 500.0
# material_count = 4

[store]
# Shared directory for surface records. Defaults to the platform data dir.
# directory = "/tmp/panorama-store"

[host]
# tick_rate_hz = 60       # 1-240

[logging]
# level = "info"          # trace, debug, info, warn, error
"##
    .to_string()
}
