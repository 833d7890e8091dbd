//! Byte-addressed storage device

/// Storage reached through a bus with per-transfer byte counts
///
/// Each call reports how many bytes were actually transferred; a count
/// short of the request is a fault that the caller handles.
pub trait Storage {
    /// Send `bytes` to the device at `address`
    ///
    /// Returns the number of bytes the device accepted.
    fn write(&mut self, address: u8, bytes: &[u8]) -> usize;

    /// Fill `buf` from the device at `address`
    ///
    /// Returns the number of bytes received.
    fn read(&mut self, address: u8, buf: &mut [u8]) -> usize;
}

impl<T: Storage + ?Sized> Storage for &mut T {
    fn write(&mut self, address: u8, bytes: &[u8]) -> usize {
        (**self).write(address, bytes)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> usize {
        (**self).read(address, buf)
    }
}
