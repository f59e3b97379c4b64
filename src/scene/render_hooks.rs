use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Information passed to per-frame hooks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameInfo {
    /// Index of the frame, starting at 0.
    pub frame: u64,
    /// Time elapsed since the previous frame, in seconds.
    pub delta: f64,
}

/// Identifies a hook registered on [`RenderHooks`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookHandle(u64);

type Hook = Rc<RefCell<Box<dyn FnMut(&FrameInfo)>>>;

#[derive(Default)]
struct RenderHooksData {
    next_id: u64,
    hooks: Vec<(HookHandle, Hook)>,
}

/// The ordered list of callbacks run before each frame is rendered.
///
/// Hooks are identified by the handle returned when they are added, so removing
/// one never affects another hook, even an identical one. Hooks run in
/// registration order. A hook added while the hooks are running first runs on
/// the next frame; a hook removed while they are running does not run anymore.
///
/// # Example
/// ```
/// # use diamond_sphere::scene::RenderHooks;
/// # use std::cell::Cell;
/// # use std::rc::Rc;
/// let hooks = RenderHooks::new();
/// let frames = Rc::new(Cell::new(0));
///
/// let f = frames.clone();
/// let handle = hooks.add(move |_| f.set(f.get() + 1));
/// let _ = hooks.run(1.0 / 60.0);
/// assert!(hooks.remove(handle));
/// let _ = hooks.run(1.0 / 60.0);
/// assert_eq!(frames.get(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RenderHooks {
    data: Rc<RefCell<RenderHooksData>>,
    frame: Rc<Cell<u64>>,
}

impl RenderHooks {
    /// Creates an empty list of hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hook at the end of the list.
    pub fn add(&self, hook: impl FnMut(&FrameInfo) + 'static) -> HookHandle {
        let mut data = self.data.borrow_mut();
        let handle = HookHandle(data.next_id);
        data.next_id += 1;
        data.hooks.push((handle, Rc::new(RefCell::new(Box::new(hook)))));
        handle
    }

    /// Removes a hook.
    ///
    /// Returns `false` if the hook was not registered.
    pub fn remove(&self, handle: HookHandle) -> bool {
        let mut data = self.data.borrow_mut();

        match data.hooks.iter().position(|(h, _)| *h == handle) {
            Some(i) => {
                let _ = data.hooks.remove(i);
                true
            }
            None => false,
        }
    }

    /// Whether the hook identified by `handle` is registered.
    pub fn contains(&self, handle: HookHandle) -> bool {
        self.data.borrow().hooks.iter().any(|(h, _)| *h == handle)
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.data.borrow().hooks.len()
    }

    /// Whether no hook is registered.
    pub fn is_empty(&self) -> bool {
        self.data.borrow().hooks.is_empty()
    }

    /// Index of the next frame.
    pub fn frame(&self) -> u64 {
        self.frame.get()
    }

    /// Runs every hook once, for a frame lasting `delta` seconds.
    pub fn run(&self, delta: f64) -> FrameInfo {
        let info = FrameInfo {
            frame: self.frame.get(),
            delta,
        };
        self.frame.set(info.frame + 1);

        let snapshot: Vec<(HookHandle, Hook)> = self.data.borrow().hooks.clone();

        for (handle, hook) in snapshot {
            if !self.contains(handle) {
                continue;
            }

            match hook.try_borrow_mut() {
                Ok(mut hook) => (*hook)(&info),
                Err(_) => log::warn!("render hook {:?} is already running, skipped", handle),
            }
        }

        info
    }
}
