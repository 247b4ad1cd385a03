//! The manifest executor.
//!
//! [`Generator`] performs a [`Manifest`] against a destination root, one entry
//! at a time, and reports what it did to each path. In [`Mode::Destroy`] the
//! same manifest is walked backwards to undo a previous generation.
//!
//! # Collisions
//!
//! Planned class names are checked against a [`ClassIndex`] of the
//! application before anything is written. Existing files are compared by
//! content: identical files are left alone, differing files are handled by
//! the configured [`CollisionPolicy`].

use std::fmt;
use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use nest_core::{CollisionPolicy, DerivedNames, GeneratorConfig, ResourceSpec};

use crate::collision::ClassIndex;
use crate::error::{CollisionKind, GenerateError};
use crate::manifest::{Manifest, ManifestEntry, ManifestOptions, build_manifest};
use crate::routes::{self, RouteEdit};
use crate::templates::Renderer;

/// Migration version format (UTC).
const MIGRATION_VERSION_FORMAT: &str = "%Y%m%d%H%M%S";

/// Whether a run creates or removes the scaffold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Write the scaffold.
    #[default]
    Create,
    /// Remove a previously generated scaffold.
    Destroy,
}

/// What happened to one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionStatus {
    /// A file or directory was created.
    Create,
    /// A directory already existed.
    Exists,
    /// A file already existed with the same content.
    Identical,
    /// A differing file was overwritten.
    Force,
    /// A differing file was left in place.
    Skip,
    /// A route was added.
    Route,
    /// A file or route was removed.
    Remove,
    /// There was nothing to remove.
    Missing,
    /// An empty directory was removed.
    Rmdir,
    /// A directory was kept because it still has contents.
    NotEmpty,
}

impl ActionStatus {
    /// The label printed in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Exists => "exists",
            Self::Identical => "identical",
            Self::Force => "force",
            Self::Skip => "skip",
            Self::Route => "route",
            Self::Remove => "remove",
            Self::Missing => "missing",
            Self::Rmdir => "rmdir",
            Self::NotEmpty => "notempty",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The outcome of one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    /// What happened.
    pub status: ActionStatus,
    /// Path relative to the destination root, or the route declaration.
    pub target: String,
}

impl ActionReport {
    fn new(status: ActionStatus, target: impl fmt::Display) -> Self {
        Self {
            status,
            target: target.to_string(),
        }
    }
}

impl fmt::Display for ActionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>12}  {}", self.status, self.target)
    }
}

/// Plans and executes scaffolds under one configuration.
///
/// # Examples
///
/// ```no_run
/// use nest_core::{GeneratorConfig, ResourceSpec};
/// use nest_generator::{Generator, Mode};
///
/// let generator = Generator::new(GeneratorConfig::default())?;
/// let spec = ResourceSpec::new("category", Some("site")).with_attributes(["title:string"]);
/// let manifest = generator.plan(&spec)?;
///
/// for report in generator.run(&manifest, Mode::Create)? {
///     println!("{report}");
/// }
/// # Ok::<(), nest_generator::GenerateError>(())
/// ```
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    renderer: Renderer,
    migration_version: Option<String>,
}

impl Generator {
    /// Creates a generator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Config`] for an invalid configuration, or
    /// [`GenerateError::Template`] if an embedded template fails to compile.
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        Ok(Self {
            config,
            renderer: Renderer::new()?,
            migration_version: None,
        })
    }

    /// Uses a fixed migration version instead of the current UTC time.
    #[must_use]
    pub fn with_migration_version(mut self, version: impl Into<String>) -> Self {
        self.migration_version = Some(version.into());
        self
    }

    /// The active configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Derives names for `spec` and builds its manifest.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Config`] if the resource or owner name is
    /// missing or malformed.
    pub fn plan(&self, spec: &ResourceSpec) -> Result<Manifest, GenerateError> {
        let names = DerivedNames::derive(spec, &self.config)?;
        build_manifest(
            &names,
            spec.attributes(),
            &ManifestOptions::new(spec, &self.config),
        )
    }

    /// Executes `manifest` and collects the reports.
    ///
    /// # Errors
    ///
    /// See [`Generator::run_with`].
    pub fn run(&self, manifest: &Manifest, mode: Mode) -> Result<Vec<ActionReport>, GenerateError> {
        let mut reports = Vec::with_capacity(manifest.entries().len());
        self.run_with(manifest, mode, |report| reports.push(report.clone()))?;
        Ok(reports)
    }

    /// Executes `manifest`, passing each report to `sink` as soon as the
    /// entry completes.
    ///
    /// Entries before a failure stay applied.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Collision`] for an existing class, a
    /// differing file under [`CollisionPolicy::Abort`], or a differing
    /// migration. Returns [`GenerateError::Routes`] if the routes file is
    /// missing or has no draw block, and [`GenerateError::Io`] for any
    /// filesystem failure.
    pub fn run_with<F>(&self, manifest: &Manifest, mode: Mode, mut sink: F) -> Result<(), GenerateError>
    where
        F: FnMut(&ActionReport),
    {
        let mut run = Run {
            generator: self,
            manifest,
            root: &self.config.destination_root,
            version: self.migration_version.clone().unwrap_or_else(|| {
                chrono::Utc::now()
                    .format(MIGRATION_VERSION_FORMAT)
                    .to_string()
            }),
            classes: None,
        };

        tracing::info!(
            root = %run.root,
            ?mode,
            pretend = self.config.pretend,
            entries = manifest.entries().len(),
            "Running manifest"
        );

        let mut performed = 0usize;
        match mode {
            Mode::Create => {
                for entry in manifest.entries() {
                    if let Some(report) = run.create(entry)? {
                        tracing::debug!(status = %report.status, target = %report.target, "Created");
                        sink(&report);
                        performed += 1;
                    }
                }
            }
            Mode::Destroy => {
                for entry in manifest.entries().iter().rev() {
                    if let Some(report) = run.destroy(entry)? {
                        tracing::debug!(status = %report.status, target = %report.target, "Destroyed");
                        sink(&report);
                        performed += 1;
                    }
                }
            }
        }

        tracing::info!(performed, "Manifest complete");
        Ok(())
    }
}

/// State for a single pass over a manifest.
struct Run<'a> {
    generator: &'a Generator,
    manifest: &'a Manifest,
    root: &'a Utf8Path,
    version: String,
    classes: Option<ClassIndex>,
}

impl Run<'_> {
    const fn pretend(&self) -> bool {
        self.generator.config.pretend
    }

    fn create(&mut self, entry: &ManifestEntry) -> Result<Option<ActionReport>, GenerateError> {
        match entry {
            ManifestEntry::ClassCollisions { class_names } => {
                self.check_classes(class_names)?;
                Ok(None)
            }
            ManifestEntry::Directory { path } => self.create_directory(path).map(Some),
            ManifestEntry::Template {
                template,
                destination,
                assigns,
            } => {
                let content =
                    self.generator
                        .renderer
                        .render(*template, self.manifest.base(), assigns)?;
                self.write_file(destination, &content).map(Some)
            }
            ManifestEntry::Migration {
                template,
                directory,
                file_name,
                assigns,
            } => {
                let content =
                    self.generator
                        .renderer
                        .render(*template, self.manifest.base(), assigns)?;
                self.write_migration(directory, file_name, &content)
                    .map(Some)
            }
            ManifestEntry::RouteResources { resource } => self.add_route(resource).map(Some),
        }
    }

    fn destroy(&self, entry: &ManifestEntry) -> Result<Option<ActionReport>, GenerateError> {
        match entry {
            ManifestEntry::ClassCollisions { .. } => Ok(None),
            ManifestEntry::Directory { path } => self.remove_directory(path).map(Some),
            ManifestEntry::Template { destination, .. } => {
                self.remove_file(destination).map(Some)
            }
            ManifestEntry::Migration {
                directory,
                file_name,
                ..
            } => self.remove_migration(directory, file_name).map(Some),
            ManifestEntry::RouteResources { resource } => self.remove_route(resource).map(Some),
        }
    }

    fn check_classes(&mut self, class_names: &[String]) -> Result<(), GenerateError> {
        if self.classes.is_none() {
            let planned: Vec<&Utf8Path> = self
                .manifest
                .entries()
                .iter()
                .filter(|e| matches!(e, ManifestEntry::Template { .. }))
                .filter_map(ManifestEntry::destination)
                .collect();
            self.classes = Some(ClassIndex::scan(self.root, &planned)?);
        }

        let existing = self
            .classes
            .as_ref()
            .and_then(|classes| classes.first_collision(class_names));
        match existing {
            Some(existing) => Err(GenerateError::collision(CollisionKind::Class, existing)),
            None => Ok(()),
        }
    }

    fn create_directory(&self, path: &Utf8Path) -> Result<ActionReport, GenerateError> {
        let full = self.root.join(path);
        if full.is_dir() {
            return Ok(ActionReport::new(ActionStatus::Exists, path));
        }
        if !self.pretend() {
            fs::create_dir_all(&full).map_err(|e| GenerateError::io(&full, e))?;
        }
        Ok(ActionReport::new(ActionStatus::Create, path))
    }

    fn write_file(&self, path: &Utf8Path, content: &str) -> Result<ActionReport, GenerateError> {
        let full = self.root.join(path);
        let status = match read_existing(&full)? {
            None => ActionStatus::Create,
            Some(existing) if existing == content => {
                return Ok(ActionReport::new(ActionStatus::Identical, path));
            }
            Some(_) => match self.generator.config.collision {
                CollisionPolicy::Abort => {
                    return Err(GenerateError::collision(CollisionKind::File, path.as_str()));
                }
                CollisionPolicy::Skip => {
                    tracing::warn!(path = %path, "Keeping existing file with different content");
                    return Ok(ActionReport::new(ActionStatus::Skip, path));
                }
                CollisionPolicy::Force => ActionStatus::Force,
            },
        };

        if !self.pretend() {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).map_err(|e| GenerateError::io(parent, e))?;
            }
            fs::write(&full, content).map_err(|e| GenerateError::io(&full, e))?;
        }
        Ok(ActionReport::new(status, path))
    }

    fn write_migration(
        &self,
        directory: &Utf8Path,
        slug: &str,
        content: &str,
    ) -> Result<ActionReport, GenerateError> {
        if let Some(existing) = self.find_migration(directory, slug)? {
            let relative = directory.join(&existing);
            let full = self.root.join(&relative);
            let current = fs::read_to_string(&full).map_err(|e| GenerateError::io(&full, e))?;
            if current == content {
                return Ok(ActionReport::new(ActionStatus::Identical, relative));
            }
            if self.generator.config.collision == CollisionPolicy::Skip {
                tracing::warn!(migration = slug, "Keeping existing migration");
                return Ok(ActionReport::new(ActionStatus::Skip, relative));
            }
            return Err(GenerateError::collision(CollisionKind::Migration, slug));
        }

        let relative = directory.join(format!("{}_{slug}.rb", self.version));
        let full = self.root.join(&relative);
        if !self.pretend() {
            let dir = self.root.join(directory);
            fs::create_dir_all(&dir).map_err(|e| GenerateError::io(&dir, e))?;
            fs::write(&full, content).map_err(|e| GenerateError::io(&full, e))?;
        }
        Ok(ActionReport::new(ActionStatus::Create, relative))
    }

    /// The file name of an existing `<version>_<slug>.rb` migration.
    fn find_migration(&self, directory: &Utf8Path, slug: &str) -> Result<Option<String>, GenerateError> {
        let dir = self.root.join(directory);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(GenerateError::io(&dir, e)),
        };

        for entry in entries {
            let entry = entry.map_err(|e| GenerateError::io(&dir, e))?;
            let Ok(file_name) = entry.file_name().into_string() else {
                continue;
            };
            if migration_slug(&file_name) == Some(slug) {
                return Ok(Some(file_name));
            }
        }
        Ok(None)
    }

    fn routes_path(&self) -> Utf8PathBuf {
        self.root.join(&self.generator.config.routes_file)
    }

    fn add_route(&self, resource: &str) -> Result<ActionReport, GenerateError> {
        let path = self.routes_path();
        let line = routes::resources_line(resource);
        let Some(contents) = read_existing(&path)? else {
            return Err(GenerateError::routes(&path, "file not found"));
        };

        match routes::insert_resources(&contents, resource) {
            None => Err(GenerateError::routes(
                &path,
                format!("no `{}` line", routes::ROUTES_SENTINEL),
            )),
            Some(RouteEdit::Unchanged) => Ok(ActionReport::new(ActionStatus::Identical, line)),
            Some(RouteEdit::Changed(updated)) => {
                if !self.pretend() {
                    fs::write(&path, updated).map_err(|e| GenerateError::io(&path, e))?;
                }
                Ok(ActionReport::new(ActionStatus::Route, line))
            }
        }
    }

    fn remove_route(&self, resource: &str) -> Result<ActionReport, GenerateError> {
        let path = self.routes_path();
        let line = routes::resources_line(resource);
        let Some(contents) = read_existing(&path)? else {
            return Ok(ActionReport::new(ActionStatus::Missing, line));
        };

        match routes::remove_resources(&contents, resource) {
            RouteEdit::Unchanged => Ok(ActionReport::new(ActionStatus::Missing, line)),
            RouteEdit::Changed(updated) => {
                if !self.pretend() {
                    fs::write(&path, updated).map_err(|e| GenerateError::io(&path, e))?;
                }
                Ok(ActionReport::new(ActionStatus::Remove, line))
            }
        }
    }

    fn remove_file(&self, path: &Utf8Path) -> Result<ActionReport, GenerateError> {
        let full = self.root.join(path);
        if !full.is_file() {
            return Ok(ActionReport::new(ActionStatus::Missing, path));
        }
        if !self.pretend() {
            fs::remove_file(&full).map_err(|e| GenerateError::io(&full, e))?;
        }
        Ok(ActionReport::new(ActionStatus::Remove, path))
    }

    fn remove_migration(&self, directory: &Utf8Path, slug: &str) -> Result<ActionReport, GenerateError> {
        match self.find_migration(directory, slug)? {
            Some(existing) => self.remove_file(&directory.join(existing)),
            None => Ok(ActionReport::new(
                ActionStatus::Missing,
                directory.join(format!("{slug}.rb")),
            )),
        }
    }

    fn remove_directory(&self, path: &Utf8Path) -> Result<ActionReport, GenerateError> {
        let full = self.root.join(path);
        if !full.is_dir() {
            return Ok(ActionReport::new(ActionStatus::Missing, path));
        }

        let mut contents = fs::read_dir(&full).map_err(|e| GenerateError::io(&full, e))?;
        if contents.next().is_some() {
            return Ok(ActionReport::new(ActionStatus::NotEmpty, path));
        }
        if !self.pretend() {
            fs::remove_dir(&full).map_err(|e| GenerateError::io(&full, e))?;
        }
        Ok(ActionReport::new(ActionStatus::Rmdir, path))
    }
}

/// Reads a file, treating a missing file as `None`.
fn read_existing(path: &Utf8Path) -> Result<Option<String>, GenerateError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GenerateError::io(path, e)),
    }
}

/// The slug of a `<digits>_<slug>.rb` migration file name.
fn migration_slug(file_name: &str) -> Option<&str> {
    let (version, rest) = file_name.strip_suffix(".rb")?.split_once('_')?;
    (!version.is_empty() && version.bytes().all(|b| b.is_ascii_digit())).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION: &str = "20240101000000";
    const ROUTES: &str = "ActionController::Routing::Routes.draw do |map|\n  map.resources :sites\nend\n";

    struct Fixture {
        _tmp: tempfile::TempDir,
        root: Utf8PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = tempfile::tempdir().unwrap();
            let root = Utf8Path::from_path(tmp.path()).unwrap().to_owned();
            fs::create_dir_all(root.join("config")).unwrap();
            fs::write(root.join("config/routes.rb"), ROUTES).unwrap();
            Self { _tmp: tmp, root }
        }

        fn generator(&self, configure: impl FnOnce(&mut GeneratorConfig)) -> Generator {
            let mut config = GeneratorConfig {
                destination_root: self.root.clone(),
                ..GeneratorConfig::default()
            };
            configure(&mut config);
            Generator::new(config)
                .unwrap()
                .with_migration_version(VERSION)
        }

        fn read(&self, relative: &str) -> String {
            fs::read_to_string(self.root.join(relative)).unwrap()
        }

        fn exists(&self, relative: &str) -> bool {
            self.root.join(relative).exists()
        }
    }

    fn category() -> ResourceSpec {
        ResourceSpec::new("category", Some("site")).with_attributes(["title:string", "body:text"])
    }

    fn statuses(reports: &[ActionReport]) -> Vec<ActionStatus> {
        reports.iter().map(|r| r.status).collect()
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ActionStatus::NotEmpty.as_str(), "notempty");
        let report = ActionReport::new(ActionStatus::Create, "app/models/category.rb");
        assert_eq!(report.to_string(), "      create  app/models/category.rb");
    }

    #[test]
    fn test_migration_slug() {
        assert_eq!(
            migration_slug("20240101000000_create_categories.rb"),
            Some("create_categories")
        );
        assert_eq!(migration_slug("create_categories.rb"), None);
        assert_eq!(migration_slug("001_create_sites.rb"), Some("create_sites"));
        assert_eq!(migration_slug("20240101000000_create_categories.txt"), None);
    }

    #[test]
    fn test_generate_fresh_tree() {
        let fixture = Fixture::new();
        let generator = fixture.generator(|_| {});
        let manifest = generator.plan(&category()).unwrap();

        let reports = generator.run(&manifest, Mode::Create).unwrap();
        assert_eq!(reports.len(), 27);
        assert!(reports.iter().all(|r| matches!(
            r.status,
            ActionStatus::Create | ActionStatus::Route
        )));

        assert!(
            fixture
                .read("app/models/category.rb")
                .starts_with("class Category < ActiveRecord::Base\n  belongs_to :site\n")
        );
        assert!(fixture.exists("app/views/categories/_form.html.erb"));
        assert!(fixture.exists("spec/views/categories/edit.html.erb_spec.rb"));
        assert!(!fixture.exists("spec/views/categories/_form.html.erb_spec.rb"));
        assert!(
            fixture
                .read("db/migrate/20240101000000_create_categories.rb")
                .contains("class CreateCategories < ActiveRecord::Migration")
        );
        assert!(
            fixture
                .read("config/routes.rb")
                .contains("\n  map.resources :categories\n")
        );
    }

    #[test]
    fn test_fixtures_hold_yaml_values() {
        let fixture = Fixture::new();
        let generator = fixture.generator(|_| {});
        let spec = ResourceSpec::new("post", Some("blog")).with_attributes([
            "published_at:datetime",
            "day:date",
            "views:integer",
            "title:string",
        ]);
        generator
            .run(&generator.plan(&spec).unwrap(), Mode::Create)
            .unwrap();

        let fixtures = fixture.read("spec/fixtures/posts.yml");
        assert!(fixtures.contains("  blog_id: 1\n"));
        assert!(fixtures.contains("  published_at: <%= Time.now.to_s(:db) %>\n"));
        assert!(fixtures.contains("  day: <%= Date.today.to_s(:db) %>\n"));
        assert!(fixtures.contains("  views: 1\n"));
        assert!(fixtures.contains("  title: MyString\n"));
        assert!(!fixtures.contains(": Time.now"));
        assert!(!fixtures.contains(": Date.today"));
        assert!(!fixtures.contains('"'));

        // Specs still get Ruby literals.
        assert!(
            fixture
                .read("spec/models/post_spec.rb")
                .contains(":published_at => Time.now")
        );
    }

    #[test]
    fn test_view_specs_need_no_helper_module() {
        let fixture = Fixture::new();
        let generator = fixture.generator(|_| {});
        generator
            .run(&generator.plan(&category()).unwrap(), Mode::Create)
            .unwrap();

        assert!(!fixture.exists("app/helpers/categories_helper.rb"));
        for action in ["index", "show", "new", "edit"] {
            let spec = fixture.read(&format!("spec/views/categories/{action}.html.erb_spec.rb"));
            assert!(!spec.contains("Helper"), "{action}");
            assert!(spec.contains("  before(:each) do\n"), "{action}");
        }
    }

    #[test]
    fn test_rerun_is_identical() {
        let fixture = Fixture::new();
        let manifest = fixture.generator(|_| {}).plan(&category()).unwrap();
        fixture.generator(|_| {}).run(&manifest, Mode::Create).unwrap();

        let rerun = Generator::new(GeneratorConfig {
            destination_root: fixture.root.clone(),
            ..GeneratorConfig::default()
        })
        .unwrap()
        .with_migration_version("20250101000000");
        let reports = rerun.run(&manifest, Mode::Create).unwrap();

        assert!(reports.iter().all(|r| matches!(
            r.status,
            ActionStatus::Identical | ActionStatus::Exists
        )));
        assert!(!fixture.exists("db/migrate/20250101000000_create_categories.rb"));
    }

    #[test]
    fn test_modified_file_aborts() {
        let fixture = Fixture::new();
        let generator = fixture.generator(|_| {});
        let manifest = generator.plan(&category()).unwrap();
        generator.run(&manifest, Mode::Create).unwrap();
        fs::write(fixture.root.join("app/models/category.rb"), "# edited\n").unwrap();

        let err = generator.run(&manifest, Mode::Create).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Collision {
                kind: CollisionKind::File,
                ref target,
            } if target == "app/models/category.rb"
        ));
        assert_eq!(fixture.read("app/models/category.rb"), "# edited\n");
    }

    #[test]
    fn test_force_and_skip_policies() {
        let fixture = Fixture::new();
        let generator = fixture.generator(|_| {});
        let manifest = generator.plan(&category()).unwrap();
        generator.run(&manifest, Mode::Create).unwrap();
        let original = fixture.read("app/models/category.rb");

        fs::write(fixture.root.join("app/models/category.rb"), "# edited\n").unwrap();
        let skipping = fixture.generator(|c| c.collision = CollisionPolicy::Skip);
        let reports = skipping.run(&manifest, Mode::Create).unwrap();
        assert!(reports.contains(&ActionReport::new(
            ActionStatus::Skip,
            "app/models/category.rb"
        )));
        assert_eq!(fixture.read("app/models/category.rb"), "# edited\n");

        let forcing = fixture.generator(|c| c.collision = CollisionPolicy::Force);
        let reports = forcing.run(&manifest, Mode::Create).unwrap();
        assert!(reports.contains(&ActionReport::new(
            ActionStatus::Force,
            "app/models/category.rb"
        )));
        assert_eq!(fixture.read("app/models/category.rb"), original);
    }

    #[test]
    fn test_pretend_writes_nothing() {
        let fixture = Fixture::new();
        let generator = fixture.generator(|c| c.pretend = true);
        let manifest = generator.plan(&category()).unwrap();

        let reports = generator.run(&manifest, Mode::Create).unwrap();
        assert_eq!(reports.len(), 27);
        assert!(!fixture.exists("app"));
        assert!(!fixture.exists("db"));
        assert_eq!(fixture.read("config/routes.rb"), ROUTES);
    }

    #[test]
    fn test_existing_class_aborts_before_writing() {
        let fixture = Fixture::new();
        fs::create_dir_all(fixture.root.join("lib")).unwrap();
        fs::write(fixture.root.join("lib/category.rb"), "class Category\nend\n").unwrap();

        let generator = fixture.generator(|_| {});
        let manifest = generator.plan(&category()).unwrap();
        let err = generator.run(&manifest, Mode::Create).unwrap_err();

        assert!(matches!(
            err,
            GenerateError::Collision {
                kind: CollisionKind::Class,
                ref target,
            } if target == "Category"
        ));
        assert!(!fixture.exists("app"));
    }

    #[test]
    fn test_differing_migration_collides() {
        let fixture = Fixture::new();
        fs::create_dir_all(fixture.root.join("db/migrate")).unwrap();
        fs::write(
            fixture.root.join("db/migrate/001_create_categories.rb"),
            "class CreateCategories\nend\n",
        )
        .unwrap();

        let generator = fixture.generator(|_| {});
        let manifest = generator.plan(&category()).unwrap();
        let err = generator.run(&manifest, Mode::Create).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Collision {
                kind: CollisionKind::Migration,
                ..
            }
        ));
    }

    #[test]
    fn test_skip_migration() {
        let fixture = Fixture::new();
        let generator = fixture.generator(|_| {});
        let manifest = generator
            .plan(&category().with_skip_migration(true))
            .unwrap();

        let reports = generator.run(&manifest, Mode::Create).unwrap();
        assert_eq!(reports.len(), 26);
        assert!(!fixture.exists("db/migrate"));
    }

    #[test]
    fn test_missing_routes_file() {
        let fixture = Fixture::new();
        fs::remove_file(fixture.root.join("config/routes.rb")).unwrap();

        let generator = fixture.generator(|_| {});
        let manifest = generator.plan(&category()).unwrap();
        let err = generator.run(&manifest, Mode::Create).unwrap_err();
        assert!(matches!(err, GenerateError::Routes { .. }));
    }

    #[test]
    fn test_destroy_removes_generated_files() {
        let fixture = Fixture::new();
        let generator = fixture.generator(|_| {});
        let manifest = generator.plan(&category()).unwrap();
        generator.run(&manifest, Mode::Create).unwrap();

        let reports = generator.run(&manifest, Mode::Destroy).unwrap();
        assert_eq!(
            reports.first(),
            Some(&ActionReport::new(
                ActionStatus::Remove,
                "map.resources :categories"
            ))
        );
        assert!(statuses(&reports).contains(&ActionStatus::Rmdir));

        assert!(!fixture.exists("app/models/category.rb"));
        assert!(!fixture.exists("app/views/categories"));
        assert!(!fixture.exists("db/migrate/20240101000000_create_categories.rb"));
        assert_eq!(fixture.read("config/routes.rb"), ROUTES);
    }

    #[test]
    fn test_destroy_keeps_foreign_files() {
        let fixture = Fixture::new();
        let generator = fixture.generator(|_| {});
        let manifest = generator.plan(&category()).unwrap();
        generator.run(&manifest, Mode::Create).unwrap();
        fs::write(fixture.root.join("app/models/site.rb"), "class Site\nend\n").unwrap();

        let reports = generator.run(&manifest, Mode::Destroy).unwrap();
        assert!(reports.contains(&ActionReport::new(ActionStatus::NotEmpty, "app/models")));
        assert!(fixture.exists("app/models/site.rb"));
    }

    #[test]
    fn test_destroy_without_generation() {
        let fixture = Fixture::new();
        let generator = fixture.generator(|_| {});
        let manifest = generator.plan(&category()).unwrap();

        let reports = generator.run(&manifest, Mode::Destroy).unwrap();
        assert!(reports.iter().all(|r| r.status == ActionStatus::Missing));
    }
}
