//! FFI 接口 - C/C++ 宿主绑定
//!
//! 宿主传入 JSON 负载，取回带绝对坐标的卡片 JSON，并把点击转发回来。

use crate::config::RenderConfig;
use crate::event::InteractionHandler;
use crate::layout::Available;
use crate::runtime::CardSession;
use crate::template::Template;
use log::warn;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use std::ptr;
use url::Url;

/// 点击回调：`(user_data, interaction_id, action_url 或 NULL)`
pub type CrInteractionCallback =
    extern "C" fn(user_data: *mut c_void, interaction_id: *const c_char, action_url: *const c_char);

struct CallbackHandler {
    callback: CrInteractionCallback,
    user_data: *mut c_void,
}

// 宿主保证 user_data 在会话存活期间可跨线程使用
unsafe impl Send for CallbackHandler {}
unsafe impl Sync for CallbackHandler {}

impl InteractionHandler for CallbackHandler {
    fn on_interact(&self, interaction_id: &str, action_url: Option<&Url>) {
        let id = match CString::new(interaction_id) {
            Ok(id) => id,
            Err(err) => {
                warn!("interaction id contains NUL byte: {}", err);
                return;
            }
        };
        let url = action_url.and_then(|u| CString::new(u.as_str()).ok());
        let url_ptr = url.as_ref().map_or(ptr::null(), |u| u.as_ptr());
        (self.callback)(self.user_data, id.as_ptr(), url_ptr);
    }
}

unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// 创建会话；负载不是 JSON 对象时返回 NULL
#[no_mangle]
pub unsafe extern "C" fn cr_session_new(payload: *const c_char, config: *const c_char) -> *mut CardSession {
    let Some(payload) = read_str(payload) else {
        return ptr::null_mut();
    };
    let template = match Template::from_json_str(payload) {
        Ok(template) => template,
        Err(_) => return ptr::null_mut(),
    };
    let config = match read_str(config) {
        Some(json) => match RenderConfig::from_json_str(json) {
            Ok(config) => config,
            Err(err) => {
                warn!("invalid render config, using defaults: {}", err);
                RenderConfig::default()
            }
        },
        None => RenderConfig::default(),
    };
    Box::into_raw(Box::new(CardSession::new(template, config)))
}

/// 销毁会话
#[no_mangle]
pub unsafe extern "C" fn cr_session_free(session: *mut CardSession) {
    if !session.is_null() {
        drop(Box::from_raw(session));
    }
}

/// 渲染并返回 JSON，高度 <= 0 表示不限高；返回的字符串由 `cr_string_free` 释放
#[no_mangle]
pub unsafe extern "C" fn cr_session_render_json(session: *mut CardSession, width: f32, height: f32) -> *mut c_char {
    let Some(session) = session.as_mut() else {
        return ptr::null_mut();
    };
    let available = Available::new(width, (height > 0.0).then_some(height));
    if let Err(err) = session.render(available) {
        warn!("card layout failed: {}", err);
        return ptr::null_mut();
    }
    session
        .rendered_json()
        .and_then(|json| CString::new(json).ok())
        .map_or(ptr::null_mut(), CString::into_raw)
}

/// 设置点击回调
#[no_mangle]
pub unsafe extern "C" fn cr_session_set_interaction_callback(
    session: *mut CardSession,
    callback: CrInteractionCallback,
    user_data: *mut c_void,
) {
    if let Some(session) = session.as_mut() {
        session.set_interaction_handler(Box::new(CallbackHandler { callback, user_data }));
    }
}

/// 在最近一次渲染结果上分发点击，命中按钮返回 true
#[no_mangle]
pub unsafe extern "C" fn cr_session_tap(session: *const CardSession, x: f32, y: f32) -> bool {
    match session.as_ref() {
        Some(session) => session.tap(x, y),
        None => false,
    }
}

/// 释放本库返回的字符串
#[no_mangle]
pub unsafe extern "C" fn cr_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
