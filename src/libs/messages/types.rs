#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted(String),
    ConfigNotFound,
    ConfigModuleCatalog,
    ConfigModuleCalendar,
    ConfigModuleLicense,
    ConfigModulePaths,

    // === PROMPTS ===
    PromptSelectModules,
    PromptCatalogUrl,
    PromptCalendarId,
    PromptLookaheadWeeks,
    PromptLicenseServer,
    PromptLicensePort,
    PromptDownloadDir,
    PromptInstallRoot,

    // === RELEASE MESSAGES ===
    ReleaseExplicit(String),
    ReleaseFromCalendar(String),
    CurrentRelease(String),

    // === LOCATOR MESSAGES ===
    SearchingBuilds { bundle: String, platform: String, release: String },
    BuildFound { build: String, file_name: String },

    // === INSTALL MESSAGES ===
    InstallationUpToDate { path: String, build: String },
    DownloadOnlyComplete(String),
    InstallCompleted { build: String, path: String },
    ElapsedTime(String),

    // === UNINSTALL MESSAGES ===
    UninstallCompleted(String),
    NothingToUninstall(String),

    // === VALIDATION MESSAGES ===
    DownloadDirNotFound(String),
    InstallRootWithDownloadOnly,
    InstallRootOnWindows,
    OptionalComponentBundle(String),
    OptionalComponentPlatform,
}
