#[cfg(test)]
mod tests {
    use lbi::libs::bundle::{matching_links, select_installer, BundleSpec, BundleType, Platform};

    const BUILD_PAGE: &str = r#"
<html><body>
<h1>2024-2 build-049</h1>
<h3>General Installers</h3>
<ul>
  <li><a href="/OB/2024-2/build-049/Suite_2024-2_MacOSX_knime.dmg">MacOSX (with KNIME)</a></li>
  <li><a href="/OB/2024-2/build-049/Suite_2024-2_MacOSX.dmg">MacOSX</a></li>
  <li><a href="/OB/2024-2/build-049/Suite_2024-2_Windows-x64.zip">Windows</a></li>
  <li><a href="/OB/2024-2/build-049/Suite_2024-2_Linux-x86_64.tar">Linux</a></li>
</ul>
<h3>Academic Installers</h3>
<ul>
  <li><a href="/OB/2024-2/build-049/Academic_2024-2_MacOSX.dmg">MacOSX</a></li>
  <li><a href="/OB/2024-2/build-049/Academic_2024-2_MacOSX_alt.dmg">MacOSX alternate</a></li>
  <li><a href="/OB/2024-2/build-049/Academic_2024-2_Linux-x86_64.tar">Linux</a></li>
  <li><a href="/OB/2024-2/build-049/DESRES_2024-2_Linux-x86_64.tar">Linux DESRES</a></li>
</ul>
<h3>Advanced Installers</h3>
<h3>Documentation</h3>
<ul>
  <li><a href="/OB/2024-2/build-049/Advanced_2024-2_Linux-x86_64.tar">Linux</a></li>
</ul>
</body></html>
"#;

    fn spec(bundle_type: BundleType, platform: Platform, knime: bool) -> BundleSpec {
        BundleSpec::new(bundle_type, platform, knime)
    }

    #[test]
    fn test_general_linux_takes_first_match() {
        let installer = select_installer(BUILD_PAGE, &spec(BundleType::General, Platform::Linux, false));
        assert_eq!(installer.as_deref(), Some("Suite_2024-2_Linux-x86_64.tar"));
    }

    #[test]
    fn test_mac_without_optional_component_prefers_second_link() {
        let installer = select_installer(BUILD_PAGE, &spec(BundleType::General, Platform::MacOSX, false));
        assert_eq!(installer.as_deref(), Some("Suite_2024-2_MacOSX.dmg"));
    }

    #[test]
    fn test_mac_with_optional_component_takes_first_link() {
        let installer = select_installer(BUILD_PAGE, &spec(BundleType::General, Platform::MacOSX, true));
        assert_eq!(installer.as_deref(), Some("Suite_2024-2_MacOSX_knime.dmg"));
    }

    #[test]
    fn test_academic_mac_takes_first_link() {
        let installer = select_installer(BUILD_PAGE, &spec(BundleType::Academic, Platform::MacOSX, false));
        assert_eq!(installer.as_deref(), Some("Academic_2024-2_MacOSX.dmg"));
    }

    #[test]
    fn test_desres_searches_academic_section_by_marker() {
        let desres = spec(BundleType::Desres, Platform::Linux, false);
        let links = matching_links(BUILD_PAGE, &desres);

        assert_eq!(links.len(), 1);
        assert!(links[0].text.contains("DESRES"));
        assert_eq!(select_installer(BUILD_PAGE, &desres).as_deref(), Some("DESRES_2024-2_Linux-x86_64.tar"));
    }

    #[test]
    fn test_single_mac_link_falls_back_to_first() {
        let page = r#"<h3>Advanced Installers</h3><ul><li><a href="x/Adv_MacOSX.dmg">MacOSX</a></li></ul>"#;
        let installer = select_installer(page, &spec(BundleType::Advanced, Platform::MacOSX, false));
        assert_eq!(installer.as_deref(), Some("Adv_MacOSX.dmg"));
    }

    #[test]
    fn test_missing_section_is_none() {
        let page = "<html><body><h3>General Installers</h3><ul></ul></body></html>";
        assert!(select_installer(page, &spec(BundleType::Academic, Platform::Linux, false)).is_none());
    }

    #[test]
    fn test_section_without_platform_links_is_none() {
        assert!(select_installer(BUILD_PAGE, &spec(BundleType::Academic, Platform::Windows, false)).is_none());
    }

    #[test]
    fn test_links_after_the_next_header_are_not_in_the_section() {
        // The Advanced header is immediately followed by another header.
        assert!(select_installer(BUILD_PAGE, &spec(BundleType::Advanced, Platform::Linux, false)).is_none());
    }

    #[test]
    fn test_section_headers() {
        assert_eq!(BundleType::Desres.section_header(), "Academic Installers");
        assert_eq!(BundleType::Advanced.section_header(), "Advanced Installers");
        assert!(BundleType::General.supports_optional_component());
        assert!(!BundleType::Desres.supports_optional_component());
    }

    #[test]
    fn test_platform_from_os() {
        assert_eq!(Platform::from_os("macos").unwrap(), Platform::MacOSX);
        assert_eq!(Platform::from_os("windows").unwrap().to_string(), "Windows");
        assert!(Platform::from_os("freebsd").is_err());
    }
}
