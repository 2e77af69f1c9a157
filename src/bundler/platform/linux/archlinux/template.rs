//! PKGBUILD template constants.
//!
//! `{{...}}` values are escaped for double-quoted bash strings at render time;
//! every interpolation below sits inside double quotes.

/// Default PKGBUILD recipe.
pub const PKGBUILD_TEMPLATE: &str = r#"# Maintainer: {{maintainer}}

pkgname="{{pkgname}}"
pkgver="{{version_name}}"
pkgrel="{{version}}"
pkgdesc="{{description}}"
arch=("{{architecture}}")
url="{{url}}"
license=("{{license}}")
depends=({{#each depends}}"{{this}}"{{#unless @last}} {{/unless}}{{/each}})
source=()
sha1sums=()

build() {
  echo "build ..."
}

package() {
  mkdir -p "$pkgdir{{install_dir}}"
  cp -r "{{build_dir}}"/{bin,lib} "$pkgdir{{install_dir}}/"
  chmod +x "$pkgdir{{install_dir}}"/bin/*
  chmod -R a+rX "$pkgdir{{install_dir}}"
{{#if launcher}}
  mkdir -p "$pkgdir/usr/bin"
  ln -s "{{install_dir}}/bin/{{launcher.target}}" "$pkgdir/usr/bin/{{launcher.link}}"
{{/if}}
}
"#;

/// Artifact name produced by makepkg. Triple-stash: a file name, not bash.
pub const FILENAME_TEMPLATE: &str =
    "{{{pkgname}}}-{{{version_name}}}-{{{version}}}-{{{architecture}}}.{{{extension}}}";
