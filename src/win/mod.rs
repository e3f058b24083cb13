mod hkey;

pub use hkey::RootKey;

pub const WCHAR_SIZE: usize = 2;

pub fn to_wide(str: &str) -> Vec<u16> {
    str.encode_utf16().chain(Some(0)).collect()
}

#[cfg(windows)]
pub fn format_message(hr: i32) -> Option<String> {
    use std::ptr;

    use winapi::um::winbase::{
        FormatMessageW, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS,
    };

    let mut buf = [0; 512];
    let chars = unsafe {
        FormatMessageW(
            FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
            ptr::null(),
            hr as _,
            0,
            buf.as_mut_ptr(),
            buf.len() as _,
            ptr::null_mut(),
        )
    };

    if chars == 0 {
        return None;
    }

    let message = String::from_utf16_lossy(&buf[..chars as usize]);
    Some(message.trim_end().to_owned())
}

#[cfg(not(windows))]
pub fn format_message(_hr: i32) -> Option<String> {
    None
}
