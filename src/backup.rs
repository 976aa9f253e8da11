use crate::paths;
use crate::store::ClassStore;
use anyhow::{anyhow, Context};
use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const MANIFEST_ENTRY: &str = "manifest.json";
const CLASS_DIR_ENTRY: &str = "class";
pub const BUNDLE_FORMAT_V1: &str = "classbook-class-v1";

/// Integrity and provenance record stored inside each bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleManifest {
    pub format: String,
    pub app_version: String,
    pub exported_at: String,
    pub class_name: String,
    pub data_file_sha256: String,
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub bundle_format: String,
    pub entry_count: usize,
}

#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub class_name: String,
}

/// Zips one class's data file, avatars, and chart data into a portable
/// bundle with a manifest carrying a digest of the data file.
pub fn export_class_bundle(
    store: &ClassStore,
    class_name: &str,
    out_path: &Path,
) -> anyhow::Result<ExportSummary> {
    let config = store.config();
    let data_file = paths::data_file(config, class_name);
    if !data_file.is_file() {
        return Err(anyhow!(
            "class data file not found: {}",
            data_file.display()
        ));
    }
    let data_bytes = std::fs::read(&data_file)
        .with_context(|| format!("failed to read class data {}", data_file.display()))?;

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let out_file = File::create(out_path)
        .with_context(|| format!("failed to create output file {}", out_path.display()))?;
    let mut zip = ZipWriter::new(out_file);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let manifest = BundleManifest {
        format: BUNDLE_FORMAT_V1.to_string(),
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        exported_at: chrono::Utc::now().to_rfc3339(),
        class_name: class_name.to_string(),
        data_file_sha256: format!("{:x}", Sha256::digest(&data_bytes)),
    };
    zip.start_file(MANIFEST_ENTRY, opts)
        .context("failed to start manifest entry")?;
    zip.write_all(
        serde_json::to_string_pretty(&manifest)
            .context("failed to serialize manifest")?
            .as_bytes(),
    )
    .context("failed to write manifest entry")?;

    let data_entry_name = format!(
        "{}/{}{}",
        CLASS_DIR_ENTRY, class_name, config.data_file_suffix
    );
    zip.start_file(&data_entry_name, opts)
        .context("failed to start data file entry")?;
    zip.write_all(&data_bytes)
        .context("failed to write data file entry")?;

    let mut entry_count = 2;
    entry_count += add_dir_entries(
        &mut zip,
        opts,
        &paths::avatars_dir(config, class_name),
        &format!("{CLASS_DIR_ENTRY}/avatars"),
    )?;
    entry_count += add_dir_entries(
        &mut zip,
        opts,
        &paths::chart_data_dir(config, class_name),
        &format!("{CLASS_DIR_ENTRY}/chart_data"),
    )?;

    zip.finish().context("failed to finalize zip bundle")?;
    info!("exported class {} to {}", class_name, out_path.display());

    Ok(ExportSummary {
        bundle_format: BUNDLE_FORMAT_V1.to_string(),
        entry_count,
    })
}

/// Restores a bundle into the store, provisioning storage for the class
/// named in the manifest. The data file only replaces an existing one after
/// its digest has checked out and the bytes are fully on disk.
pub fn import_class_bundle(store: &ClassStore, in_path: &Path) -> anyhow::Result<ImportSummary> {
    let in_file = File::open(in_path)
        .with_context(|| format!("failed to open bundle {}", in_path.display()))?;
    let mut archive = ZipArchive::new(in_file).context("invalid zip archive")?;

    let mut manifest_text = String::new();
    archive
        .by_name(MANIFEST_ENTRY)
        .context("bundle missing manifest.json")?
        .read_to_string(&mut manifest_text)
        .context("failed to read manifest.json")?;
    let manifest: BundleManifest =
        serde_json::from_str(&manifest_text).context("manifest.json is invalid JSON")?;
    if manifest.format != BUNDLE_FORMAT_V1 {
        return Err(anyhow!("unsupported bundle format: {}", manifest.format));
    }

    let config = store.config();
    let data_file_name = format!("{}{}", manifest.class_name, config.data_file_suffix);
    let data_entry_name = format!("{}/{}", CLASS_DIR_ENTRY, data_file_name);

    // Verify the data file against the manifest before unpacking anything.
    let mut bytes = Vec::new();
    archive
        .by_name(&data_entry_name)
        .context("bundle missing class data file entry")?
        .read_to_end(&mut bytes)
        .context("failed to read data file entry")?;
    let digest = format!("{:x}", Sha256::digest(&bytes));
    if digest != manifest.data_file_sha256 {
        return Err(anyhow!(
            "class data digest mismatch: manifest says {}, bundle contains {}",
            manifest.data_file_sha256,
            digest
        ));
    }

    store
        .provision_class_storage(&manifest.class_name)
        .with_context(|| format!("failed to provision storage for {}", manifest.class_name))?;
    let class_dir = paths::class_dir(config, &manifest.class_name);

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).context("failed to read bundle entry")?;
        if entry.is_dir() {
            continue;
        }
        let entry_path = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                return Err(anyhow!("bundle entry has an unsafe path: {}", entry.name()))
            }
        };
        // Everything outside class/ (the manifest included) is not unpacked;
        // the data file entry goes through the temp-and-rename path below.
        let rel = match entry_path.strip_prefix(CLASS_DIR_ENTRY) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };
        if rel == Path::new(&data_file_name) {
            continue;
        }
        let dest = class_dir.join(&rel);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let mut out = File::create(&dest)
            .with_context(|| format!("failed to create {}", dest.display()))?;
        std::io::copy(&mut entry, &mut out)
            .with_context(|| format!("failed to extract {}", rel.display()))?;
    }

    // Extract to a temp name first so a failed import cannot clobber a
    // valid data file.
    let data_file = class_dir.join(&data_file_name);
    let tmp_dst = class_dir.join(format!("{data_file_name}.importing"));
    if tmp_dst.exists() {
        let _ = std::fs::remove_file(&tmp_dst);
    }
    std::fs::write(&tmp_dst, &bytes)
        .with_context(|| format!("failed to write {}", tmp_dst.display()))?;
    if data_file.exists() {
        std::fs::remove_file(&data_file).with_context(|| {
            format!("failed to remove existing data file {}", data_file.display())
        })?;
    }
    std::fs::rename(&tmp_dst, &data_file)
        .with_context(|| format!("failed to move data file to {}", data_file.display()))?;

    info!(
        "imported class {} from {}",
        manifest.class_name,
        in_path.display()
    );
    Ok(ImportSummary {
        class_name: manifest.class_name,
    })
}

fn add_dir_entries(
    zip: &mut ZipWriter<File>,
    opts: FileOptions,
    dir: &Path,
    entry_prefix: &str,
) -> anyhow::Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let mut files = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut count = 0;
    for path in files {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => return Err(anyhow!("unusable file name in {}", dir.display())),
        };
        zip.start_file(format!("{entry_prefix}/{name}"), opts)
            .with_context(|| format!("failed to start entry for {name}"))?;
        let mut f =
            File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
        std::io::copy(&mut f, zip).with_context(|| format!("failed to write entry for {name}"))?;
        count += 1;
    }
    Ok(count)
}
