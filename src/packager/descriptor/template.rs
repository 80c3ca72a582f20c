//! Embedded PyInstaller descriptor template.

/// Handlebars template for the generated `.spec` descriptor.
///
/// Rendered with `entry_point`, `app_name`, `version`, the `datas` and
/// `hidden_imports` lists, and the `macos_bundle` flag that appends the
/// BUNDLE section producing the `.app`.
pub const SPEC_TEMPLATE: &str = r#"# -*- mode: python ; coding: utf-8 -*-
# Generated by tracknote-packager. Do not edit by hand.

block_cipher = None

a = Analysis(
    ['{{entry_point}}'],
    pathex=[],
    binaries=[],
    datas=[
{{#each datas}}        ('{{this}}', '.'),
{{/each}}    ],
    hiddenimports=[
{{#each hidden_imports}}        '{{this}}',
{{/each}}    ],
    hookspath=[],
    runtime_hooks=[],
    excludes=[],
    cipher=block_cipher,
)

pyz = PYZ(a.pure, a.zipped_data, cipher=block_cipher)

exe = EXE(
    pyz,
    a.scripts,
    a.binaries,
    a.datas,
    [],
    name='{{app_name}}',
    debug=False,
    strip=False,
    upx=True,
    console=False,
)
{{#if macos_bundle}}
app = BUNDLE(
    exe,
    name='{{app_name}}.app',
    icon=None,
    bundle_identifier='com.tracknote.{{bundle_suffix}}',
    info_plist={
        'CFBundleShortVersionString': '{{version}}',
        'NSHighResolutionCapable': True,
    },
)
{{/if}}"#;
