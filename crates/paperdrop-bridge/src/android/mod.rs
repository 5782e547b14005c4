// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android media index via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Capability A goes through the platform
// `ContentResolver`: one insert into the Downloads collection of the media
// store, then a streamed write through the returned `OutputStream`.
// Capability B needs no JNI beyond resolving the public Downloads
// directory, which `downloads_dir` provides for `platform_writer`.

#![cfg(target_os = "android")]

use std::io::{self, Write};
use std::path::PathBuf;

use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::JNIEnv;

use paperdrop_core::error::{PaperdropError, Result};

use crate::traits::{MediaEntry, MediaIndex};

/// Media store column: display name of the entry.
const COLUMN_DISPLAY_NAME: &str = "_display_name";
/// Media store column: declared MIME type.
const COLUMN_MIME_TYPE: &str = "mime_type";
/// Media store column: collection-relative target path.
const COLUMN_RELATIVE_PATH: &str = "relative_path";

/// `Environment.DIRECTORY_DOWNLOADS` — the Downloads collection name.
const DIRECTORY_DOWNLOADS: &str = "Download";

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Obtain a [`JNIEnv`] handle from the global Android context.
///
/// Calls `ndk_context::android_context()` to retrieve the `JavaVM*` pointer
/// set by the NDK glue code, then attaches the current thread if it is not
/// already attached.
fn jni_env() -> Result<JNIEnv<'static>> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| PaperdropError::Unexpected(format!("failed to obtain JavaVM: {e}")))?;
    vm.attach_current_thread()
        .map_err(|e| PaperdropError::Unexpected(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the hosting Android `Context` as a [`JObject`].
fn context() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(PaperdropError::Unexpected(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Convenience: map any `jni::errors::Error` into `PaperdropError`.
fn jni_err(context: &str, e: jni::errors::Error) -> PaperdropError {
    PaperdropError::Unexpected(format!("{context}: {e}"))
}

/// SDK level of the running OS, from `Build.VERSION.SDK_INT`.
pub fn sdk_version() -> Result<u32> {
    let mut env = jni_env()?;
    let sdk_int = env
        .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .map_err(|e| jni_err("Build.VERSION.SDK_INT", e))?
        .i()
        .map_err(|e| jni_err("SDK_INT->i", e))?;
    Ok(sdk_int as u32)
}

/// Absolute path of the public Downloads directory, from
/// `Environment.getExternalStoragePublicDirectory`.
pub fn downloads_dir() -> Result<PathBuf> {
    let mut env = jni_env()?;

    let j_dir_name: JString = env
        .new_string(DIRECTORY_DOWNLOADS)
        .map_err(|e| jni_err("new_string(DIRECTORY_DOWNLOADS)", e))?;

    let dir_obj: JObject = env
        .call_static_method(
            "android/os/Environment",
            "getExternalStoragePublicDirectory",
            "(Ljava/lang/String;)Ljava/io/File;",
            &[JValue::Object(&j_dir_name)],
        )
        .map_err(|e| jni_err("getExternalStoragePublicDirectory", e))?
        .l()
        .map_err(|e| jni_err("getExternalStoragePublicDirectory->l", e))?;

    let abs_path: JObject = env
        .call_method(&dir_obj, "getAbsolutePath", "()Ljava/lang/String;", &[])
        .map_err(|e| jni_err("File.getAbsolutePath", e))?
        .l()
        .map_err(|e| jni_err("getAbsolutePath->l", e))?;

    let path: String = env
        .get_string(&JString::from(abs_path))
        .map_err(|e| jni_err("get_string(path)", e))?
        .into();
    Ok(PathBuf::from(path))
}

// ---------------------------------------------------------------------------
// Media index
// ---------------------------------------------------------------------------

/// Android implementation of the media index.
///
/// All methods go through JNI to call the Android SDK. The struct is
/// zero-sized; all state lives on the Java side.
pub struct AndroidMediaIndex;

impl AndroidMediaIndex {
    /// Create a new Android media index handle.
    ///
    /// This does **not** touch JNI — the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidMediaIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// `context.getContentResolver()`.
fn content_resolver<'a>(env: &mut JNIEnv<'a>, context: &JObject) -> Result<JObject<'a>> {
    env.call_method(
        context,
        "getContentResolver",
        "()Landroid/content/ContentResolver;",
        &[],
    )
    .map_err(|e| jni_err("getContentResolver", e))?
    .l()
    .map_err(|e| jni_err("getContentResolver->l", e))
}

/// `values.put(key, value)` for string pairs.
fn put_string(env: &mut JNIEnv, values: &JObject, key: &str, value: &str) -> Result<()> {
    let j_key: JString = env
        .new_string(key)
        .map_err(|e| jni_err("new_string(key)", e))?;
    let j_value: JString = env
        .new_string(value)
        .map_err(|e| jni_err("new_string(value)", e))?;
    env.call_method(
        values,
        "put",
        "(Ljava/lang/String;Ljava/lang/String;)V",
        &[JValue::Object(&j_key), JValue::Object(&j_value)],
    )
    .map_err(|e| jni_err("ContentValues.put", e))?;
    Ok(())
}

impl MediaIndex for AndroidMediaIndex {
    /// Register the entry via `ContentResolver.insert` into
    /// `MediaStore.Downloads.EXTERNAL_CONTENT_URI`.
    ///
    /// A null URI from the resolver maps to `Ok(None)` — the caller turns
    /// that into a registration failure.
    fn insert(&self, display_name: &str, mime_type: &str) -> Result<Option<MediaEntry>> {
        let mut env = jni_env()?;
        let context = context()?;

        tracing::debug!(name = display_name, mime = mime_type, "media store insert");

        let resolver = content_resolver(&mut env, &context)?;

        let values: JObject = env
            .new_object("android/content/ContentValues", "()V", &[])
            .map_err(|e| jni_err("new ContentValues", e))?;
        put_string(&mut env, &values, COLUMN_DISPLAY_NAME, display_name)?;
        put_string(&mut env, &values, COLUMN_MIME_TYPE, mime_type)?;
        put_string(&mut env, &values, COLUMN_RELATIVE_PATH, DIRECTORY_DOWNLOADS)?;

        let collection: JObject = env
            .get_static_field(
                "android/provider/MediaStore$Downloads",
                "EXTERNAL_CONTENT_URI",
                "Landroid/net/Uri;",
            )
            .map_err(|e| jni_err("MediaStore.Downloads.EXTERNAL_CONTENT_URI", e))?
            .l()
            .map_err(|e| jni_err("EXTERNAL_CONTENT_URI->l", e))?;

        let uri: JObject = env
            .call_method(
                &resolver,
                "insert",
                "(Landroid/net/Uri;Landroid/content/ContentValues;)Landroid/net/Uri;",
                &[JValue::Object(&collection), JValue::Object(&values)],
            )
            .map_err(|e| jni_err("ContentResolver.insert", e))?
            .l()
            .map_err(|e| jni_err("insert->l", e))?;

        if uri.is_null() {
            tracing::warn!(name = display_name, "media store returned no URI");
            return Ok(None);
        }

        let uri_string: JObject = env
            .call_method(&uri, "toString", "()Ljava/lang/String;", &[])
            .map_err(|e| jni_err("Uri.toString", e))?
            .l()
            .map_err(|e| jni_err("toString->l", e))?;
        let uri: String = env
            .get_string(&JString::from(uri_string))
            .map_err(|e| jni_err("get_string(uri)", e))?
            .into();

        Ok(Some(MediaEntry { uri }))
    }

    /// Open the write stream via `ContentResolver.openOutputStream`.
    fn open_output(&self, entry: &MediaEntry) -> Result<Box<dyn Write>> {
        let mut env = jni_env()?;
        let context = context()?;

        let resolver = content_resolver(&mut env, &context)?;

        let j_uri_string: JString = env
            .new_string(&entry.uri)
            .map_err(|e| jni_err("new_string(uri)", e))?;
        let uri: JObject = env
            .call_static_method(
                "android/net/Uri",
                "parse",
                "(Ljava/lang/String;)Landroid/net/Uri;",
                &[JValue::Object(&j_uri_string)],
            )
            .map_err(|e| jni_err("Uri.parse", e))?
            .l()
            .map_err(|e| jni_err("parse->l", e))?;

        let stream: JObject = env
            .call_method(
                &resolver,
                "openOutputStream",
                "(Landroid/net/Uri;)Ljava/io/OutputStream;",
                &[JValue::Object(&uri)],
            )
            .map_err(|e| jni_err("openOutputStream", e))?
            .l()
            .map_err(|e| jni_err("openOutputStream->l", e))?;

        if stream.is_null() {
            return Err(PaperdropError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "resolver returned no output stream",
            )));
        }

        let stream = env
            .new_global_ref(&stream)
            .map_err(|e| jni_err("new_global_ref(stream)", e))?;

        Ok(Box::new(JavaOutputStream { stream }))
    }
}

/// `std::io::Write` adapter over a `java.io.OutputStream`.
///
/// Drop closes the Java stream, so scope-based cleanup on the Rust side
/// carries through to the platform handle on every exit path.
struct JavaOutputStream {
    stream: GlobalRef,
}

impl JavaOutputStream {
    fn call_void(&self, method: &str) -> io::Result<()> {
        let mut env = jni_env().map_err(io::Error::other)?;
        env.call_method(self.stream.as_obj(), method, "()V", &[])
            .map_err(|e| io::Error::other(format!("OutputStream.{method}: {e}")))?;
        Ok(())
    }
}

impl Write for JavaOutputStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut env = jni_env().map_err(io::Error::other)?;
        let byte_array = env
            .byte_array_from_slice(buf)
            .map_err(|e| io::Error::other(format!("byte_array_from_slice: {e}")))?;
        env.call_method(
            self.stream.as_obj(),
            "write",
            "([B)V",
            &[JValue::Object(&byte_array)],
        )
        .map_err(|e| io::Error::other(format!("OutputStream.write: {e}")))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.call_void("flush")
    }
}

impl Drop for JavaOutputStream {
    fn drop(&mut self) {
        if let Err(e) = self.call_void("close") {
            tracing::warn!(error = %e, "failed to close media store output stream");
        }
    }
}
