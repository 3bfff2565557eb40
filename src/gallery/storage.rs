use chrono::{Local, NaiveDateTime};
use log::{debug, info};
use rand::Rng;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("the gallery already holds the maximum of {0} images")]
    Full(usize),
    #[error("{0:?} is not a file")]
    NotAFile(PathBuf),
    #[error("unsupported image type {0:?} (use jpg, jpeg or png)")]
    Unsupported(PathBuf),
    #[error("{0:?} is not in the gallery")]
    Unknown(PathBuf),
    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> GalleryError + '_ {
    move |source| GalleryError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn image_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// The user's reward pictures, copied into an app-private directory.
///
/// Selection is without replacement: every saved image is shown once before
/// any repeats.
pub struct ImageStore {
    dir: PathBuf,
    max_images: usize,
    saved: Vec<PathBuf>,
    used: HashSet<PathBuf>,
}

impl ImageStore {
    pub fn open(dir: &Path, max_images: usize) -> Result<Self, GalleryError> {
        std::fs::create_dir_all(dir).map_err(io_err(dir))?;
        let mut store = Self {
            dir: dir.to_path_buf(),
            max_images,
            saved: Vec::new(),
            used: HashSet::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Rescan the directory. Used entries that vanished are forgotten.
    pub fn reload(&mut self) -> Result<(), GalleryError> {
        let mut saved = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(io_err(&self.dir))? {
            let path = entry.map_err(io_err(&self.dir))?.path();
            if path.is_file() && image_extension(&path).is_some() {
                saved.push(path);
            }
        }
        saved.sort();
        self.saved = saved;
        let saved = &self.saved;
        self.used.retain(|p| saved.contains(p));
        info!("Loaded {} images from {:?}", self.saved.len(), self.dir);
        Ok(())
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.saved
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.saved.len() >= self.max_images
    }

    pub fn max_images(&self) -> usize {
        self.max_images
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Pick an image not shown since the last reset.
    pub fn next_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<PathBuf> {
        if self.saved.is_empty() {
            debug!("No images available");
            return None;
        }
        if self.used.len() >= self.saved.len() {
            self.used.clear();
            debug!("Every image shown, starting a new rotation");
        }
        let available: Vec<&PathBuf> = self.saved.iter().filter(|p| !self.used.contains(*p)).collect();
        if available.is_empty() {
            return None;
        }
        let pick = available[rng.random_range(0..available.len())].clone();
        self.used.insert(pick.clone());
        debug!("Picked {:?} ({}/{} used)", pick.file_name(), self.used.len(), self.saved.len());
        Some(pick)
    }

    pub fn add(&mut self, source: &Path) -> Result<PathBuf, GalleryError> {
        self.add_at(source, Local::now().naive_local())
    }

    /// Copy `source` in verbatim under a timestamp-derived name.
    pub fn add_at(&mut self, source: &Path, now: NaiveDateTime) -> Result<PathBuf, GalleryError> {
        if self.is_full() {
            return Err(GalleryError::Full(self.max_images));
        }
        if !source.is_file() {
            return Err(GalleryError::NotAFile(source.to_path_buf()));
        }
        let ext = image_extension(source).ok_or_else(|| GalleryError::Unsupported(source.to_path_buf()))?;

        let stem = format!("img_{}", now.format("%Y%m%d_%H%M%S"));
        let mut dest = self.dir.join(format!("{}.{}", stem, ext));
        let mut n = 1;
        while dest.exists() {
            dest = self.dir.join(format!("{}_{}.{}", stem, n, ext));
            n += 1;
        }

        let bytes = std::fs::read(source).map_err(io_err(source))?;
        std::fs::write(&dest, bytes).map_err(io_err(&dest))?;

        self.saved.push(dest.clone());
        self.saved.sort();
        info!("Image saved: {:?}", dest.file_name());
        Ok(dest)
    }

    pub fn remove(&mut self, path: &Path) -> Result<(), GalleryError> {
        if !self.saved.iter().any(|p| p == path) {
            return Err(GalleryError::Unknown(path.to_path_buf()));
        }
        if path.exists() {
            std::fs::remove_file(path).map_err(io_err(path))?;
        }
        self.saved.retain(|p| p != path);
        self.used.remove(path);
        info!("Image removed: {:?}", path.file_name());
        Ok(())
    }

    /// Look an image up by its file name.
    pub fn find(&self, name: &str) -> Option<&PathBuf> {
        self.saved
            .iter()
            .find(|p| p.file_name().and_then(|f| f.to_str()) == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn source_image(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, name.as_bytes()).unwrap();
        path
    }

    fn store_with(n: usize) -> (tempfile::TempDir, ImageStore) {
        let tmp = tempfile::tempdir().unwrap();
        let src = source_image(tmp.path(), "pic.jpg");
        let mut store = ImageStore::open(&tmp.path().join("images"), 20).unwrap();
        for i in 0..n {
            store.add_at(&src, at(9, 0, i as u32)).unwrap();
        }
        (tmp, store)
    }

    #[test]
    fn test_add_copies_verbatim_with_timestamp_name() {
        let tmp = tempfile::tempdir().unwrap();
        let src = source_image(tmp.path(), "Beach.PNG");
        let mut store = ImageStore::open(&tmp.path().join("images"), 20).unwrap();

        let first = store.add_at(&src, at(8, 30, 5)).unwrap();
        let second = store.add_at(&src, at(8, 30, 5)).unwrap();

        assert_eq!(first.file_name().unwrap(), "img_20261017_083005.png");
        assert_eq!(second.file_name().unwrap(), "img_20261017_083005_1.png");
        assert_eq!(std::fs::read(&first).unwrap(), b"Beach.PNG");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let tmp = tempfile::tempdir().unwrap();
        let txt = source_image(tmp.path(), "notes.txt");
        let mut store = ImageStore::open(&tmp.path().join("images"), 1).unwrap();

        assert!(matches!(store.add(&txt), Err(GalleryError::Unsupported(_))));
        assert!(matches!(
            store.add(&tmp.path().join("missing.jpg")),
            Err(GalleryError::NotAFile(_))
        ));

        let jpg = source_image(tmp.path(), "a.jpg");
        store.add(&jpg).unwrap();
        assert!(matches!(store.add(&jpg), Err(GalleryError::Full(1))));
    }

    #[test]
    fn test_rotation_has_no_repeats_until_exhausted() {
        let (_tmp, mut store) = store_with(5);
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = HashSet::new();
        for _ in 0..5 {
            assert!(seen.insert(store.next_random(&mut rng).unwrap()));
        }
        assert_eq!(store.used_count(), 5);

        // sixth pick starts a fresh rotation
        assert!(store.next_random(&mut rng).is_some());
        assert_eq!(store.used_count(), 1);
    }

    #[test]
    fn test_empty_gallery_yields_none() {
        let (_tmp, mut store) = store_with(0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(store.next_random(&mut rng).is_none());
    }

    #[test]
    fn test_remove_keeps_used_subset_of_saved() {
        let (_tmp, mut store) = store_with(3);
        let mut rng = StdRng::seed_from_u64(3);
        let shown = store.next_random(&mut rng).unwrap();

        store.remove(&shown).unwrap();
        assert!(!shown.exists());
        assert_eq!(store.len(), 2);
        assert_eq!(store.used_count(), 0);
        assert!(matches!(store.remove(&shown), Err(GalleryError::Unknown(_))));
    }

    #[test]
    fn test_reload_picks_up_existing_files() {
        let (tmp, store) = store_with(2);
        std::fs::write(tmp.path().join("images").join("ignored.txt"), b"x").unwrap();

        let reopened = ImageStore::open(&tmp.path().join("images"), 20).unwrap();
        assert_eq!(reopened.images(), store.images());
        let name = store.images()[0].file_name().unwrap().to_str().unwrap();
        assert!(reopened.find(name).is_some());
    }
}
