use foundation::math::Vec3;
use tour::hotspot::billboard_yaw;
use wasm_bindgen::prelude::*;

// Browser APIs that are simpler to drive from JS: the A-Frame component
// registry and the clipboard/share promise chains.
#[wasm_bindgen(inline_js = "
export function tour_register_face_camera(yawFn) {
    if (typeof AFRAME === 'undefined') return false;
    if (AFRAME.components['face-camera']) return true;
    AFRAME.registerComponent('face-camera', {
        init: function () {
            this.cam = new THREE.Vector3();
            this.obj = new THREE.Vector3();
        },
        tick: function () {
            const sceneCam = this.el.sceneEl && this.el.sceneEl.camera;
            if (!sceneCam || !sceneCam.el) return;
            sceneCam.el.object3D.getWorldPosition(this.cam);
            this.el.object3D.getWorldPosition(this.obj);
            const yaw = yawFn(this.obj.x, this.obj.y, this.obj.z, this.cam.x, this.cam.y, this.cam.z);
            this.el.object3D.rotation.set(0, yaw, 0);
        }
    });
    return true;
}

function tour_copy_fallback(text) {
    const area = document.createElement('textarea');
    area.value = text;
    area.style.position = 'fixed';
    area.style.left = '-999999px';
    area.style.top = '-999999px';
    document.body.appendChild(area);
    area.focus();
    area.select();
    let outcome = 'error';
    try {
        outcome = document.execCommand('copy') ? 'ok' : 'warning';
    } catch (e) {
        outcome = 'error';
    }
    document.body.removeChild(area);
    return outcome;
}

export function tour_copy_text(text) {
    if (navigator.clipboard && navigator.clipboard.writeText) {
        return navigator.clipboard.writeText(text).then(
            () => 'ok',
            () => tour_copy_fallback(text)
        );
    }
    return Promise.resolve(tour_copy_fallback(text));
}

export function tour_share(title, url) {
    if (!navigator.share) return Promise.resolve(false);
    return navigator.share({ title: title, url: url }).then(
        () => true,
        () => true
    );
}
")]
extern "C" {
    fn tour_register_face_camera(yaw_fn: &Closure<dyn Fn(f64, f64, f64, f64, f64, f64) -> f64>)
    -> bool;

    /// Resolves to `"ok"`, `"warning"` or `"error"`.
    pub fn tour_copy_text(text: &str) -> js_sys::Promise;

    /// Resolves to `false` when the Web Share API is missing.
    pub fn tour_share(title: &str, url: &str) -> js_sys::Promise;
}

/// Registers the `face-camera` component, which turns each hotspot towards
/// the camera around the vertical axis every frame.
pub fn register_face_camera() {
    let yaw = Closure::wrap(Box::new(|mx, my, mz, cx, cy, cz| {
        billboard_yaw(Vec3::new(mx, my, mz), Vec3::new(cx, cy, cz))
    }) as Box<dyn Fn(f64, f64, f64, f64, f64, f64) -> f64>);

    if tour_register_face_camera(&yaw) {
        // A-Frame holds on to the callback for the lifetime of the page.
        yaw.forget();
    } else {
        tracing::warn!("A-Frame not loaded; hotspots will not face the camera");
    }
}
