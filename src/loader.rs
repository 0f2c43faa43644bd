//! 图片加载 - 异步获取与解码，对外只暴露三种状态
//!
//! 渲染出的图片节点持有 [`ImageHandle`] 的强引用，加载线程只持有弱引用：
//! 节点离开显示树后句柄被释放，加载线程发现无法升级就放弃结果。

use crate::error::ImageError;
use log::{trace, warn};
use std::collections::{HashMap, VecDeque};
use std::io::Read;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use url::Url;

/// 解码后的 RGBA 图片
#[derive(Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: image::RgbaImage,
}

impl DecodedImage {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        let pixels = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self {
            width: pixels.width(),
            height: pixels.height(),
            pixels,
        })
    }
}

/// 图片状态
#[derive(Debug, Clone)]
pub enum ImageState {
    Pending,
    Loaded(Arc<DecodedImage>),
    Failed,
}

impl ImageState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, ImageState::Pending)
    }
}

#[derive(Debug)]
struct ImageSlot {
    state: Mutex<ImageState>,
}

/// 图片状态句柄，克隆共享同一个槽位
#[derive(Debug, Clone)]
pub struct ImageHandle {
    slot: Arc<ImageSlot>,
}

impl ImageHandle {
    pub fn new(state: ImageState) -> Self {
        Self {
            slot: Arc::new(ImageSlot { state: Mutex::new(state) }),
        }
    }

    pub fn pending() -> Self {
        Self::new(ImageState::Pending)
    }

    pub fn failed() -> Self {
        Self::new(ImageState::Failed)
    }

    pub fn loaded(image: DecodedImage) -> Self {
        Self::new(ImageState::Loaded(Arc::new(image)))
    }

    pub fn state(&self) -> ImageState {
        self.slot.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn settle(&self, state: ImageState) {
        *self.slot.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    fn downgrade(&self) -> Weak<ImageSlot> {
        Arc::downgrade(&self.slot)
    }

    fn upgrade(weak: &Weak<ImageSlot>) -> Option<ImageHandle> {
        weak.upgrade().map(|slot| ImageHandle { slot })
    }
}

/// 外部图片加载能力
pub trait ImageSource: Send + Sync {
    fn request(&self, url: &Url) -> ImageHandle;
}

/// 固定结果的图片源，未登记的 URL 一直处于 pending
#[derive(Debug, Default)]
pub struct StaticImageSource {
    entries: HashMap<String, ImageHandle>,
}

impl StaticImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(mut self, url: &str, state: ImageState) -> Self {
        self.entries.insert(url.to_string(), ImageHandle::new(state));
        self
    }
}

impl ImageSource for StaticImageSource {
    fn request(&self, url: &Url) -> ImageHandle {
        self.entries
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(ImageHandle::pending)
    }
}

type SettleNotifier = Box<dyn Fn(&str) + Send + Sync>;

/// 已完成结果的缓存，超出容量时先进先出淘汰
struct SettledCache {
    entries: HashMap<String, ImageState>,
    order: VecDeque<String>,
    capacity: usize,
}

impl SettledCache {
    fn new(capacity: usize) -> Self {
        Self { entries: HashMap::new(), order: VecDeque::new(), capacity }
    }

    fn get(&self, key: &str) -> Option<&ImageState> {
        self.entries.get(key)
    }

    fn insert(&mut self, key: String, state: ImageState) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(key.clone(), state).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                trace!("image cache evicting {}", oldest);
                self.entries.remove(&oldest);
            }
        }
    }
}

struct LoaderShared {
    /// 正在使用中的槽位
    live: Mutex<HashMap<String, Weak<ImageSlot>>>,
    /// 已完成的结果（成功或失败）
    settled: Mutex<SettledCache>,
    notifier: Option<SettleNotifier>,
    timeout: Duration,
    max_bytes: u64,
}

impl LoaderShared {
    /// 移除 `key` 的在途槽位；已被新请求替换的槽位保留
    fn forget(&self, key: &str, slot: &Weak<ImageSlot>) {
        let mut live = self.live.lock().unwrap_or_else(PoisonError::into_inner);
        if live.get(key).is_some_and(|current| Weak::ptr_eq(current, slot)) {
            live.remove(key);
        }
    }
}

const DEFAULT_CACHE_CAPACITY: usize = 256;

/// 支持 http / https / file 的加载器，每个请求一个后台线程
pub struct HttpImageLoader {
    shared: Arc<LoaderShared>,
}

impl Default for HttpImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpImageLoader {
    pub fn new() -> Self {
        Self::with_options(Duration::from_secs(10), 10 * 1024 * 1024, None)
    }

    /// `notifier` 在某个 URL 完成（成功或失败）后被调用，宿主可据此重新渲染
    pub fn with_notifier<F>(notifier: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self::with_options(Duration::from_secs(10), 10 * 1024 * 1024, Some(Box::new(notifier)))
    }

    /// 设置已完成结果的缓存条数上限，0 表示不缓存
    pub fn with_cache_capacity(self, capacity: usize) -> Self {
        self.shared.settled.lock().unwrap_or_else(PoisonError::into_inner).capacity = capacity;
        self
    }

    /// 在途的请求数
    pub fn in_flight(&self) -> usize {
        self.shared.live.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// 缓存中已完成的结果数
    pub fn cached(&self) -> usize {
        self.shared.settled.lock().unwrap_or_else(PoisonError::into_inner).entries.len()
    }

    fn with_options(timeout: Duration, max_bytes: u64, notifier: Option<SettleNotifier>) -> Self {
        Self {
            shared: Arc::new(LoaderShared {
                live: Mutex::new(HashMap::new()),
                settled: Mutex::new(SettledCache::new(DEFAULT_CACHE_CAPACITY)),
                notifier,
                timeout,
                max_bytes,
            }),
        }
    }

    fn spawn_fetch(&self, url: Url, weak: Weak<ImageSlot>) {
        let shared = Arc::clone(&self.shared);
        std::thread::spawn(move || {
            if weak.strong_count() == 0 {
                trace!("image fetch abandoned before start: {}", url);
                shared.forget(url.as_str(), &weak);
                return;
            }

            let state = match fetch(&url, shared.timeout, shared.max_bytes) {
                Ok(image) => ImageState::Loaded(Arc::new(image)),
                Err(err) => {
                    warn!("image {} failed: {}", url, err);
                    ImageState::Failed
                }
            };

            let Some(handle) = ImageHandle::upgrade(&weak) else {
                trace!("image fetch abandoned after completion: {}", url);
                shared.forget(url.as_str(), &weak);
                return;
            };
            handle.settle(state.clone());
            shared
                .settled
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(url.to_string(), state);
            shared.forget(url.as_str(), &weak);
            if let Some(notify) = &shared.notifier {
                notify(url.as_str());
            }
        });
    }
}

impl ImageSource for HttpImageLoader {
    fn request(&self, url: &Url) -> ImageHandle {
        let key = url.to_string();

        if let Some(state) = self
            .shared
            .settled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return ImageHandle::new(state.clone());
        }

        let mut live = self.shared.live.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = live.get(&key).and_then(ImageHandle::upgrade) {
            return handle;
        }

        let handle = ImageHandle::pending();
        live.insert(key, handle.downgrade());
        drop(live);

        trace!("image fetch started: {}", url);
        self.spawn_fetch(url.clone(), handle.downgrade());
        handle
    }
}

fn fetch(url: &Url, timeout: Duration, max_bytes: u64) -> Result<DecodedImage, ImageError> {
    let bytes = match url.scheme() {
        "http" | "https" => {
            let response = ureq::get(url.as_str())
                .timeout(timeout)
                .call()
                .map_err(Box::new)?;
            let mut bytes = Vec::new();
            response.into_reader().take(max_bytes).read_to_end(&mut bytes)?;
            bytes
        }
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| ImageError::UnsupportedScheme(url.to_string()))?;
            std::fs::read(path)?
        }
        other => return Err(ImageError::UnsupportedScheme(other.to_string())),
    };
    DecodedImage::from_bytes(&bytes)
}
