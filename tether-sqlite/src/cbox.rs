use std::{
    ops::{Deref, DerefMut},
    ptr,
};

/// Owner of a raw sqlite handle, released through `dealloc` unless null.
pub(crate) struct CBox<T> {
    ptr: *mut T,
    dealloc: fn(*mut T),
}

impl<T> CBox<T> {
    pub(crate) fn new(ptr: *mut T, dealloc: fn(*mut T)) -> Self {
        Self { ptr, dealloc }
    }

    /// Null owner that will receive the handle through an out pointer.
    pub(crate) fn null(dealloc: fn(*mut T)) -> Self {
        Self::new(ptr::null_mut(), dealloc)
    }

    /// Give up the ownership, the caller becomes responsible for releasing the handle.
    pub(crate) fn release(&mut self) -> *mut T {
        std::mem::replace(&mut self.ptr, ptr::null_mut())
    }
}

impl<T> Drop for CBox<T> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            (self.dealloc)(self.ptr);
        }
    }
}

impl<T> Deref for CBox<T> {
    type Target = *mut T;

    fn deref(&self) -> &Self::Target {
        &self.ptr
    }
}

impl<T> DerefMut for CBox<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.ptr
    }
}

#[cfg(test)]
mod tests {
    use super::CBox;
    use std::{
        ptr,
        sync::atomic::{AtomicUsize, Ordering},
    };

    static RELEASED: AtomicUsize = AtomicUsize::new(0);

    fn count(_: *mut i32) {
        RELEASED.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn releases_non_null_only() {
        let mut value = 123;
        {
            let ptr = CBox::null(count);
            assert!(ptr.is_null());
        }
        assert_eq!(RELEASED.load(Ordering::SeqCst), 0);
        {
            let ptr = CBox::new(&mut value as *mut i32, count);
            assert_eq!(unsafe { **ptr }, 123);
        }
        assert_eq!(RELEASED.load(Ordering::SeqCst), 1);
        {
            let mut ptr = CBox::new(&mut value as *mut i32, count);
            assert!(!ptr.release().is_null());
            assert_eq!(*ptr, ptr::null_mut());
        }
        assert_eq!(RELEASED.load(Ordering::SeqCst), 1);
    }
}
