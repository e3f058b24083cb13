use thiserror::Error;

const FACILITY_WIN32: u32 = 7;

#[cfg(not(windows))]
pub const ERROR_CALL_NOT_IMPLEMENTED: u32 = 120;
pub const ERROR_UNSUPPORTED_TYPE: u32 = 1630;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("registry access failed (HRESULT 0x{:08X})", .hresult)]
pub struct RegistryAccessError {
    hresult: i32,
}

impl RegistryAccessError {
    pub fn from_win32(status: u32) -> Self {
        Self::from_hresult(hresult_from_win32(status))
    }

    pub fn from_hresult(hresult: i32) -> Self {
        RegistryAccessError { hresult }
    }

    pub fn hresult(&self) -> i32 {
        self.hresult
    }
}

/// Same mapping as the `HRESULT_FROM_WIN32` macro.
pub fn hresult_from_win32(code: u32) -> i32 {
    if code as i32 <= 0 {
        code as i32
    } else {
        ((code & 0x0000_ffff) | (FACILITY_WIN32 << 16) | 0x8000_0000) as i32
    }
}
