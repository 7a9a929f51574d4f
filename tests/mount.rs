#[cfg(test)]
mod tests {
    use lbi::libs::error::{LbiError, Result};
    use lbi::libs::extract::extract_disk_image;
    use lbi::libs::mount::{parse_mount_point, with_mounted_image, MountedImage};
    use lbi::libs::process::{CommandRunner, ProcessSpec};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    const ATTACH_OUTPUT: &str = "/dev/disk4          \tGUID_partition_scheme\t\n\
                                 /dev/disk4s1        \tApple_HFS\t/Volumes/dmg.Ab12Cd\n";

    /// Runner that answers `hdiutil attach` with canned output and can fail `xar`.
    struct FakeRunner {
        attach_output: String,
        fail_xar: bool,
        commands: RefCell<Vec<String>>,
    }

    impl FakeRunner {
        fn new(attach_output: &str, fail_xar: bool) -> Self {
            Self {
                attach_output: attach_output.to_string(),
                fail_xar,
                commands: RefCell::new(Vec::new()),
            }
        }

        fn commands(&self) -> Vec<String> {
            self.commands.borrow().clone()
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, spec: &ProcessSpec) -> Result<String> {
            let line = spec.to_string();
            self.commands.borrow_mut().push(line.clone());

            if line.starts_with("hdiutil attach") {
                return Ok(self.attach_output.clone());
            }
            if line.starts_with("xar") && self.fail_xar {
                return Err(LbiError::InstallFailed {
                    command: line,
                    code: "1".to_string(),
                    output: "xar: Error opening archive".to_string(),
                });
            }
            Ok(String::new())
        }
    }

    #[test]
    fn test_parse_mount_point() {
        assert_eq!(parse_mount_point(ATTACH_OUTPUT), Some(PathBuf::from("/Volumes/dmg.Ab12Cd")));
        assert_eq!(parse_mount_point("hdiutil: attach failed - no mountable file systems"), None);
    }

    #[test]
    fn test_extraction_runs_between_attach_and_detach() {
        let runner = FakeRunner::new(ATTACH_OUTPUT, false);
        extract_disk_image(Path::new("/tmp/Suite_2024-2_MacOSX.dmg"), Path::new("/tmp/install_tmpdir"), &runner).unwrap();

        assert_eq!(
            runner.commands(),
            [
                "hdiutil attach -mountrandom /Volumes -nobrowse /tmp/Suite_2024-2_MacOSX.dmg",
                "xar -C /tmp/install_tmpdir -xvf /Volumes/dmg.Ab12Cd/Suite_2024-2_MacOSX.pkg",
                "hdiutil detach -force /Volumes/dmg.Ab12Cd",
            ]
        );
    }

    #[test]
    fn test_failed_extraction_still_detaches() {
        let runner = FakeRunner::new(ATTACH_OUTPUT, true);
        let result = extract_disk_image(Path::new("/tmp/Suite.dmg"), Path::new("/tmp/out"), &runner);

        assert!(matches!(result, Err(LbiError::InstallFailed { .. })));
        let commands = runner.commands();
        assert_eq!(commands.last().map(String::as_str), Some("hdiutil detach -force /Volumes/dmg.Ab12Cd"));
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn test_unparseable_attach_output_is_mount_failed() {
        let runner = FakeRunner::new("hdiutil: attach failed - image not recognized", false);
        let result = with_mounted_image(&runner, Path::new("/tmp/broken.dmg"), |_| Ok(()));

        match result {
            Err(LbiError::MountFailed { path, .. }) => assert_eq!(path, Path::new("/tmp/broken.dmg")),
            other => panic!("expected MountFailed, got {:?}", other),
        }
        assert_eq!(runner.commands().len(), 1);
    }

    #[test]
    fn test_dropped_guard_detaches() {
        let runner = FakeRunner::new(ATTACH_OUTPUT, false);
        {
            let mount = MountedImage::attach(&runner, Path::new("/tmp/Suite.dmg")).unwrap();
            assert_eq!(mount.mount_point(), Path::new("/Volumes/dmg.Ab12Cd"));
        }

        assert_eq!(runner.commands().len(), 2);
        assert_eq!(runner.commands()[1], "hdiutil detach -force /Volumes/dmg.Ab12Cd");
    }

    #[test]
    fn test_explicit_detach_runs_once() {
        let runner = FakeRunner::new(ATTACH_OUTPUT, false);
        let mount = MountedImage::attach(&runner, Path::new("/tmp/Suite.dmg")).unwrap();
        mount.detach().unwrap();

        let detaches = runner.commands().iter().filter(|c| c.starts_with("hdiutil detach")).count();
        assert_eq!(detaches, 1);
    }
}
