use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

#[cfg(windows)]
use std::ptr;

#[cfg(windows)]
use winapi::{
    shared::{
        minwindef::{DWORD, HKEY},
        winerror::ERROR_SUCCESS,
    },
    um::{
        winnt::PVOID,
        winreg::{
            RegGetValueW, HKEY_CLASSES_ROOT, HKEY_CURRENT_CONFIG, HKEY_CURRENT_USER,
            HKEY_LOCAL_MACHINE, HKEY_USERS,
        },
    },
};

#[cfg(windows)]
use crate::registry::{ValueInfo, ValueStore};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RootKey {
    ClassesRoot,
    CurrentUser,
    LocalMachine,
    Users,
    CurrentConfig,
}

impl RootKey {
    pub fn short_name(&self) -> &'static str {
        match self {
            RootKey::ClassesRoot => "HKCR",
            RootKey::CurrentUser => "HKCU",
            RootKey::LocalMachine => "HKLM",
            RootKey::Users => "HKU",
            RootKey::CurrentConfig => "HKCC",
        }
    }

    #[cfg(windows)]
    pub fn key(&self) -> Key {
        let hkey = match self {
            RootKey::ClassesRoot => HKEY_CLASSES_ROOT,
            RootKey::CurrentUser => HKEY_CURRENT_USER,
            RootKey::LocalMachine => HKEY_LOCAL_MACHINE,
            RootKey::Users => HKEY_USERS,
            RootKey::CurrentConfig => HKEY_CURRENT_CONFIG,
        };
        Key(hkey)
    }
}

impl FromStr for RootKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let root = match s.to_ascii_uppercase().as_str() {
            "HKCR" | "HKEY_CLASSES_ROOT" => RootKey::ClassesRoot,
            "HKCU" | "HKEY_CURRENT_USER" => RootKey::CurrentUser,
            "HKLM" | "HKEY_LOCAL_MACHINE" => RootKey::LocalMachine,
            "HKU" | "HKEY_USERS" => RootKey::Users,
            "HKCC" | "HKEY_CURRENT_CONFIG" => RootKey::CurrentConfig,
            _ => return Err(anyhow!("unknown registry root: {}", s)),
        };
        Ok(root)
    }
}

impl fmt::Display for RootKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Borrowed handle to an open registry key.
///
/// The key must have been opened with `KEY_QUERY_VALUE` access. It is not
/// closed when this value goes away, that stays with whoever opened it.
#[cfg(windows)]
#[derive(Copy, Clone, Debug)]
pub struct Key(HKEY);

#[cfg(windows)]
impl ValueStore for Key {
    fn get_value(
        &self,
        sub_key: Option<&[u16]>,
        value_name: Option<&[u16]>,
        flags: u32,
        data: Option<&mut [u16]>,
        data_size: u32,
    ) -> Result<ValueInfo, u32> {
        let mut value_type: DWORD = 0;

        let (data, mut size): (PVOID, DWORD) = match data {
            // Never let the registry write past the end of `buf`
            Some(buf) => (
                buf.as_mut_ptr().cast(),
                data_size.min((buf.len() * super::WCHAR_SIZE) as DWORD),
            ),
            None => (ptr::null_mut(), 0),
        };

        let status = unsafe {
            RegGetValueW(
                self.0,
                sub_key.map_or(ptr::null(), |s| s.as_ptr()),
                value_name.map_or(ptr::null(), |s| s.as_ptr()),
                flags,
                &mut value_type,
                data,
                &mut size,
            )
        };

        if status as DWORD != ERROR_SUCCESS {
            return Err(status as u32);
        }

        Ok(ValueInfo {
            value_type,
            data_size: size,
        })
    }
}
