#[cfg(test)]
mod tests {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use lbi::libs::bundle::Platform;
    use lbi::libs::error::{LbiError, Result};
    use lbi::libs::installer::{
        cpio_command, linux_install_command, windows_install_command, Installer, INSTALL_TMPDIR,
        UNSUPPORTED_PLATFORMS_ENV,
    };
    use lbi::libs::process::{CommandRunner, ProcessSpec};
    use std::cell::RefCell;
    use std::ffi::OsString;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct InstallerTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for InstallerTestContext {
        fn setup() -> Self {
            InstallerTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    impl InstallerTestContext {
        fn install_dir(&self) -> PathBuf {
            self.temp_dir.path().join("suites2024-2")
        }

        /// Linux bundle shaped like the real one: `{stem}/INSTALL` plus product archives.
        fn linux_bundle(&self) -> PathBuf {
            let bundle = self.temp_dir.path().join("Suite_2024-2_Linux-x86_64.tar.gz");
            let encoder = GzEncoder::new(File::create(&bundle).unwrap(), Compression::fast());
            let mut builder = tar::Builder::new(encoder);
            for (name, contents) in [
                ("Suite_2024-2_Linux-x86_64/INSTALL", "#!/bin/sh\n"),
                ("Suite_2024-2_Linux-x86_64/mmshare-v6.6-Linux-x86_64.tar.gz", "mmshare"),
                ("Suite_2024-2_Linux-x86_64/maestro-v13.6-Linux-x86_64.tar.gz", "maestro"),
                ("Suite_2024-2_Linux-x86_64/README.txt", "readme"),
            ] {
                let mut header = tar::Header::new_gnu();
                header.set_size(contents.len() as u64);
                header.set_mode(0o755);
                header.set_cksum();
                builder.append_data(&mut header, name, contents.as_bytes()).unwrap();
            }
            builder.into_inner().unwrap().finish().unwrap();
            bundle
        }
    }

    /// Records every spec; fails when `exit_code` is set.
    struct RecordingRunner {
        specs: RefCell<Vec<ProcessSpec>>,
        exit_code: Option<i32>,
    }

    impl RecordingRunner {
        fn new(exit_code: Option<i32>) -> Self {
            Self {
                specs: RefCell::new(Vec::new()),
                exit_code,
            }
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, spec: &ProcessSpec) -> Result<String> {
            self.specs.borrow_mut().push(spec.clone());
            match self.exit_code {
                Some(code) => Err(LbiError::InstallFailed {
                    command: spec.to_string(),
                    code: code.to_string(),
                    output: "ERROR: license check failed".to_string(),
                }),
                None => Ok("Installation complete".to_string()),
            }
        }
    }

    fn args(spec: &ProcessSpec) -> Vec<String> {
        spec.get_args().iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    fn has_unsupported_platforms_env(spec: &ProcessSpec) -> bool {
        spec.get_envs()
            .iter()
            .any(|(k, v)| k == &OsString::from(UNSUPPORTED_PLATFORMS_ENV) && v == &OsString::from("1"))
    }

    #[test]
    fn test_windows_install_command() {
        let spec = windows_install_command(Path::new("C:/tmp/install_tmpdir"), Path::new("C:/Schrodinger2024-2"));

        assert_eq!(spec.program(), Path::new("C:/tmp/install_tmpdir").join("setup-silent.exe").as_os_str());
        assert_eq!(
            args(&spec),
            ["/interactive_mode:off", "/install", "/installdir:'C:/Schrodinger2024-2'", "/force"]
        );
        assert_eq!(spec.get_cwd(), Some(Path::new("C:/tmp/install_tmpdir")));
        assert!(has_unsupported_platforms_env(&spec));
    }

    #[test_context(InstallerTestContext)]
    #[test]
    fn test_linux_install_command_lists_product_archives(ctx: &mut InstallerTestContext) {
        let tmp = ctx.temp_dir.path().join(INSTALL_TMPDIR);
        fs::create_dir_all(&tmp).unwrap();
        for name in ["INSTALL", "b-v1.tar.gz", "a-v1.tar.gz", "notes.txt"] {
            fs::write(tmp.join(name), "x").unwrap();
        }
        let target = ctx.install_dir();

        let spec = linux_install_command(&tmp, &target).unwrap();

        assert_eq!(spec.program(), tmp.join("INSTALL").as_os_str());
        let expected: Vec<String> = vec![
            "-b".to_string(),
            "-d".to_string(),
            tmp.display().to_string(),
            "-t".to_string(),
            target.join("thirdparty").display().to_string(),
            "-s".to_string(),
            target.display().to_string(),
            "-k".to_string(),
            "/scr".to_string(),
            "--allow_deprecated".to_string(),
            "a-v1.tar.gz".to_string(),
            "b-v1.tar.gz".to_string(),
        ];
        assert_eq!(args(&spec), expected);
        assert!(has_unsupported_platforms_env(&spec));
    }

    #[test_context(InstallerTestContext)]
    #[test]
    fn test_linux_install_runs_installer_and_cleans_up(ctx: &mut InstallerTestContext) {
        let bundle = ctx.linux_bundle();
        let runner = RecordingRunner::new(None);

        Installer::new(&runner, Platform::Linux).install(&bundle, &ctx.install_dir()).unwrap();

        let specs = runner.specs.borrow();
        assert_eq!(specs.len(), 1);
        let products: Vec<String> = args(&specs[0]).into_iter().filter(|a| a.ends_with(".tar.gz")).collect();
        assert_eq!(products, ["maestro-v13.6-Linux-x86_64.tar.gz", "mmshare-v6.6-Linux-x86_64.tar.gz"]);
        assert!(!ctx.install_dir().join(INSTALL_TMPDIR).exists());
    }

    #[test_context(InstallerTestContext)]
    #[test]
    fn test_failed_installer_keeps_temp_dir(ctx: &mut InstallerTestContext) {
        let bundle = ctx.linux_bundle();
        let runner = RecordingRunner::new(Some(3));

        let result = Installer::new(&runner, Platform::Linux).install(&bundle, &ctx.install_dir());

        match result {
            Err(LbiError::InstallFailed { code, output, .. }) => {
                assert_eq!(code, "3");
                assert_eq!(output, "ERROR: license check failed");
            }
            other => panic!("expected InstallFailed, got {:?}", other),
        }
        assert!(ctx.install_dir().join(INSTALL_TMPDIR).join("INSTALL").is_file());
    }

    #[test_context(InstallerTestContext)]
    #[test]
    fn test_stale_temp_dir_is_replaced(ctx: &mut InstallerTestContext) {
        let tmp = ctx.install_dir().join(INSTALL_TMPDIR);
        fs::create_dir_all(&tmp).unwrap();
        fs::write(tmp.join("left-over.tar.gz"), "old").unwrap();
        let bundle = ctx.linux_bundle();
        let runner = RecordingRunner::new(None);

        Installer::new(&runner, Platform::Linux).install(&bundle, &ctx.install_dir()).unwrap();

        let installed = args(&runner.specs.borrow()[0]);
        assert!(!installed.iter().any(|a| a == "left-over.tar.gz"));
    }

    const PAYLOAD: &str = "070707 mmshare-v6.6 payload";

    /// Stands in for hdiutil, xar and cpio on macOS.
    #[derive(Default)]
    struct DarwinRunner {
        calls: RefCell<Vec<String>>,
        cpio_input: RefCell<Vec<String>>,
    }

    impl CommandRunner for DarwinRunner {
        fn run(&self, spec: &ProcessSpec) -> Result<String> {
            let args = args(spec);
            let program = spec.program().to_string_lossy().into_owned();
            self.calls.borrow_mut().push(format!("{} {}", program, args[0]));

            match program.as_str() {
                "hdiutil" if args[0] == "attach" => Ok("/dev/disk4s1\tApple_HFS\t/Volumes/dmg.Ab12Cd\n".to_string()),
                "xar" => {
                    let payload_dir = Path::new(&args[1]).join("mmshare.pkg");
                    fs::create_dir_all(&payload_dir).unwrap();
                    let mut encoder = GzEncoder::new(File::create(payload_dir.join("Payload")).unwrap(), Compression::fast());
                    encoder.write_all(PAYLOAD.as_bytes()).unwrap();
                    encoder.finish().unwrap();
                    Ok(String::new())
                }
                "cpio" => {
                    let stdin = spec.get_stdin().unwrap();
                    self.cpio_input.borrow_mut().push(fs::read_to_string(stdin).unwrap());
                    Ok(String::new())
                }
                _ => Ok(String::new()),
            }
        }
    }

    #[test]
    fn test_cpio_command_reads_archive_from_stdin() {
        let spec = cpio_command(Path::new("/tmp/mmshare.cpio"), Path::new("/opt/schrodinger/LBI/suites2024-2"));

        assert_eq!(spec.program(), "cpio");
        assert_eq!(args(&spec), ["-i"]);
        assert_eq!(spec.get_cwd(), Some(Path::new("/opt/schrodinger/LBI/suites2024-2")));
        assert_eq!(spec.get_stdin(), Some(Path::new("/tmp/mmshare.cpio")));
        assert!(spec.to_string().ends_with("< /tmp/mmshare.cpio"));
    }

    #[test_context(InstallerTestContext)]
    #[test]
    fn test_darwin_install_mounts_expands_and_unpacks_payloads(ctx: &mut InstallerTestContext) {
        let bundle = ctx.temp_dir.path().join("Suite_2024-2_MacOSX.dmg");
        fs::write(&bundle, "disk image").unwrap();
        let runner = DarwinRunner::default();

        Installer::new(&runner, Platform::MacOSX).install(&bundle, &ctx.install_dir()).unwrap();

        assert_eq!(
            *runner.calls.borrow(),
            ["hdiutil attach", "xar -C", "hdiutil detach", "cpio -i"]
        );
        assert_eq!(*runner.cpio_input.borrow(), [PAYLOAD]);
        assert!(!ctx.install_dir().join(INSTALL_TMPDIR).exists());
    }
}
