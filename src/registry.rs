use crate::error::{RegistryAccessError, ERROR_UNSUPPORTED_TYPE};
use crate::win::{self, WCHAR_SIZE};

pub const REG_SZ: u32 = 1;

pub const RRF_RT_REG_SZ: u32 = 0x0000_0002;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ValueInfo {
    pub value_type: u32,
    pub data_size: u32,
}

/// Source of registry values, shaped after `RegGetValueW`.
///
/// `sub_key` and `value_name` are null terminated utf16 strings. When `data`
/// is `None` only the type and the required size in bytes are returned,
/// otherwise up to `data_size` bytes are written into `data` and the number of
/// bytes actually written is returned. Errors are raw Win32 status codes.
pub trait ValueStore {
    fn get_value(
        &self,
        sub_key: Option<&[u16]>,
        value_name: Option<&[u16]>,
        flags: u32,
        data: Option<&mut [u16]>,
        data_size: u32,
    ) -> Result<ValueInfo, u32>;
}

pub fn read_string<S>(
    store: &S,
    sub_key: Option<&str>,
    value_name: Option<&str>,
) -> Result<String, RegistryAccessError>
where
    S: ValueStore + ?Sized,
{
    let text = read_wide(store, sub_key, value_name)?;
    Ok(String::from_utf16_lossy(&text))
}

pub fn read_wide<S>(
    store: &S,
    sub_key: Option<&str>,
    value_name: Option<&str>,
) -> Result<Vec<u16>, RegistryAccessError>
where
    S: ValueStore + ?Sized,
{
    let sub_key = sub_key.filter(|s| !s.is_empty()).map(win::to_wide);
    let value_name = value_name.filter(|s| !s.is_empty()).map(win::to_wide);

    let probe = store
        .get_value(
            sub_key.as_deref(),
            value_name.as_deref(),
            RRF_RT_REG_SZ,
            None,
            0,
        )
        .map_err(RegistryAccessError::from_win32)?;

    log::debug!(
        "probe: type={} size={} bytes",
        probe.value_type,
        probe.data_size
    );

    if probe.value_type != REG_SZ {
        log::warn!(
            "expected REG_SZ but the store reported type {}",
            probe.value_type
        );
        return Err(RegistryAccessError::from_win32(ERROR_UNSUPPORTED_TYPE));
    }

    // Round up so an odd size still fits in the buffer
    let mut buf = vec![0u16; (probe.data_size as usize + 1) / WCHAR_SIZE];

    let fill = store
        .get_value(
            sub_key.as_deref(),
            value_name.as_deref(),
            RRF_RT_REG_SZ,
            Some(buf.as_mut_slice()),
            probe.data_size,
        )
        .map_err(RegistryAccessError::from_win32)?;

    log::debug!("fill: size={} bytes", fill.data_size);

    // The second call can report less than the probe did, so only its size
    // is trusted. It always counts the terminating null.
    let len = (fill.data_size as usize / WCHAR_SIZE).saturating_sub(1);
    buf.truncate(len);

    Ok(buf)
}
