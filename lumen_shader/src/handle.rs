/// Owning wrappers around native driver handles
///
/// One `Owned<R>` per live driver object. The wrapper is move-only and
/// releases its object at most once, either explicitly through `release()` or
/// when dropped.

use std::fmt;
use std::marker::PhantomData;

use crate::driver::{NativeHandle, ShaderDriver, SharedDriver};

/// A category of driver resource with its own release call
pub trait ResourceKind {
    /// Human-readable name used in logs
    const LABEL: &'static str;

    /// Release `handle` through `driver`
    fn release(driver: &dyn ShaderDriver, handle: NativeHandle);
}

/// Shader object category (one compiled stage)
#[derive(Debug)]
pub enum ShaderObject {}

impl ResourceKind for ShaderObject {
    const LABEL: &'static str = "shader";

    fn release(driver: &dyn ShaderDriver, handle: NativeHandle) {
        driver.delete_shader(handle);
    }
}

/// Program object category (linked program)
#[derive(Debug)]
pub enum ProgramObject {}

impl ResourceKind for ProgramObject {
    const LABEL: &'static str = "program";

    fn release(driver: &dyn ShaderDriver, handle: NativeHandle) {
        driver.delete_program(handle);
    }
}

/// Exclusive owner of one native driver object
pub struct Owned<R: ResourceKind> {
    driver: SharedDriver,
    handle: NativeHandle,
    _kind: PhantomData<R>,
}

impl<R: ResourceKind> Owned<R> {
    /// Take ownership of `handle` (may be `NONE`, in which case nothing is owned)
    pub fn new(driver: SharedDriver, handle: NativeHandle) -> Self {
        Self {
            driver,
            handle,
            _kind: PhantomData,
        }
    }

    /// An owner holding nothing
    pub fn empty(driver: SharedDriver) -> Self {
        Self::new(driver, NativeHandle::NONE)
    }

    /// Current handle (`NONE` once released or transferred)
    pub fn handle(&self) -> NativeHandle {
        self.handle
    }

    /// Whether a driver object is still held
    pub fn is_live(&self) -> bool {
        !self.handle.is_none()
    }

    /// Driver this object belongs to
    pub fn driver(&self) -> &SharedDriver {
        &self.driver
    }

    /// Release the object now
    ///
    /// # Returns
    ///
    /// `true` if a driver release happened, `false` if nothing was held
    pub fn release(&mut self) -> bool {
        if self.handle.is_none() {
            return false;
        }
        let handle = std::mem::replace(&mut self.handle, NativeHandle::NONE);
        crate::lumen_trace!("lumen::Owned", "Releasing {} {}", R::LABEL, handle);
        R::release(self.driver.as_ref(), handle);
        true
    }

    /// Move the object into a new owner, leaving `self` disarmed
    pub fn take(&mut self) -> Self {
        let handle = std::mem::replace(&mut self.handle, NativeHandle::NONE);
        Self::new(self.driver.clone(), handle)
    }
}

impl<R: ResourceKind> Drop for Owned<R> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<R: ResourceKind> fmt::Debug for Owned<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owned")
            .field("kind", &R::LABEL)
            .field("handle", &self.handle)
            .finish()
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
