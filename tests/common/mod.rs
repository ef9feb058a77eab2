//! A stand-in for a host material.
//!
//! `MockMaterial` is laid out the way the host lays out its objects: vtable
//! pointer first, state after. Every vtable slot points at a `host_method!`
//! function that casts `this` back to the mock and records what it was
//! asked to do.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::ffi::{CStr, CString, c_char, c_void};
use std::ptr;

use hostbind::MaterialVTable;
use hostbind::material::{KeyValues, MaterialVar};
use hostbind::types::{ImageFormat, MaterialVarFlags, Vector};

pub const PREVIEW_WIDTH: i32 = 64;
pub const PREVIEW_HEIGHT: i32 = 32;
pub const PREVIEW_FORMAT: ImageFormat = ImageFormat::new(12);
pub const VERTEX_FORMAT: u64 = 0x0003_0001;
pub const MORPH_FORMAT: u32 = 0x10;
pub const BASE_TEXTURE: &CStr = c"$basetexture";

#[repr(C)]
pub struct MockMaterial {
    vtable: *const MaterialVTable,
    pub ref_count: Cell<i32>,
    pub alpha: Cell<f32>,
    pub color: Cell<[f32; 3]>,
    pub flags: Cell<u32>,
    pub preview_status: Cell<i32>,
    pub shader: RefCell<CString>,
    pub proxy_data: Cell<*mut c_void>,
    pub key_values: Cell<*mut KeyValues>,
    pub calls: RefCell<Vec<&'static str>>,
    /// When clear, calls are not appended to `calls`.
    pub recording: Cell<bool>,
    vars: [u64; 2],
    params: [*mut MaterialVar; 2],
}

impl MockMaterial {
    pub fn new() -> Box<Self> {
        let mut mock = Box::new(Self {
            vtable: &MOCK_VTABLE,
            ref_count: Cell::new(1),
            alpha: Cell::new(1.0),
            color: Cell::new([1.0; 3]),
            flags: Cell::new(0),
            preview_status: Cell::new(1),
            shader: RefCell::new(c"VertexLitGeneric".to_owned()),
            proxy_data: Cell::new(ptr::null_mut()),
            key_values: Cell::new(ptr::null_mut()),
            calls: RefCell::new(Vec::new()),
            recording: Cell::new(true),
            vars: [0; 2],
            params: [ptr::null_mut(); 2],
        });
        mock.params = [mock.var(0), mock.var(1)];
        mock
    }

    pub fn as_ptr(&self) -> *mut c_void {
        ptr::from_ref(self).cast_mut().cast()
    }

    /// The host-side variable at `index`.
    pub fn var(&self, index: usize) -> *mut MaterialVar {
        ptr::from_ref(&self.vars[index]).cast_mut().cast()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str) {
        if self.recording.get() {
            self.calls.borrow_mut().push(call);
        }
    }

    fn has_flag(&self, flag: MaterialVarFlags) -> bool {
        self.flags.get() & flag.bits() != 0
    }
}

fn mock<'a>(this: *mut c_void) -> &'a MockMaterial {
    // SAFETY: every function below is only reachable through `MOCK_VTABLE`,
    // which only `MockMaterial` points at.
    unsafe { &*this.cast::<MockMaterial>() }
}

hostbind::host_method! {
    fn get_name(_this: *mut c_void) -> *const c_char {
        c"debug/debugempty".as_ptr()
    }
}

hostbind::host_method! {
    fn get_texture_group_name(_this: *mut c_void) -> *const c_char {
        c"Other textures".as_ptr()
    }
}

hostbind::host_method! {
    fn get_preview_image_properties(
        this: *mut c_void,
        width: *mut i32,
        height: *mut i32,
        format: *mut ImageFormat,
        translucent: *mut bool,
    ) -> i32 {
        let mock = mock(this);
        mock.record("GetPreviewImageProperties");
        if mock.preview_status.get() == 1 {
            // SAFETY: the binding passes pointers to its own locals.
            unsafe {
                *width = PREVIEW_WIDTH;
                *height = PREVIEW_HEIGHT;
                *format = PREVIEW_FORMAT;
                *translucent = mock.has_flag(MaterialVarFlags::TRANSLUCENT);
            }
        }
        mock.preview_status.get()
    }
}

hostbind::host_method! {
    fn get_preview_image(
        this: *mut c_void,
        data: *mut u8,
        width: i32,
        height: i32,
        _format: ImageFormat,
    ) -> i32 {
        let mock = mock(this);
        mock.record("GetPreviewImage");
        if mock.preview_status.get() == 1 {
            // SAFETY: callers size `data` for `width * height` bytes.
            unsafe { ptr::write_bytes(data, 0xab, (width * height) as usize) };
        }
        mock.preview_status.get()
    }
}

hostbind::host_method! {
    fn get_mapping_width(_this: *mut c_void) -> i32 {
        256
    }
}

hostbind::host_method! {
    fn get_mapping_height(_this: *mut c_void) -> i32 {
        128
    }
}

hostbind::host_method! {
    fn one(_this: *mut c_void) -> i32 {
        1
    }
}

hostbind::host_method! {
    fn no(_this: *mut c_void) -> bool {
        false
    }
}

hostbind::host_method! {
    fn yes(_this: *mut c_void) -> bool {
        true
    }
}

hostbind::host_method! {
    fn echo(_this: *mut c_void, value: bool) -> bool {
        value
    }
}

hostbind::host_method! {
    fn get_material_offset(_this: *mut c_void, offset: *mut f32) {
        // SAFETY: the binding passes a `[f32; 2]`.
        unsafe { offset.cast::<[f32; 2]>().write([0.25, 0.5]) }
    }
}

hostbind::host_method! {
    fn get_material_scale(_this: *mut c_void, scale: *mut f32) {
        // SAFETY: the binding passes a `[f32; 2]`.
        unsafe { scale.cast::<[f32; 2]>().write([2.0, 4.0]) }
    }
}

hostbind::host_method! {
    fn get_material_page(_this: *mut c_void) -> *mut c_void {
        ptr::null_mut()
    }
}

hostbind::host_method! {
    fn find_var(
        this: *mut c_void,
        name: *const c_char,
        found: *mut bool,
        _complain: bool,
    ) -> *mut MaterialVar {
        let mock = mock(this);
        // SAFETY: the binding passes a `&CStr` and a pointer to its own local.
        let hit = unsafe { CStr::from_ptr(name) } == BASE_TEXTURE;
        unsafe { *found = hit };
        // Like the host, a miss still hands back a (dummy) variable.
        if hit { mock.var(0) } else { mock.var(1) }
    }
}

hostbind::host_method! {
    fn increment_reference_count(this: *mut c_void) {
        let count = &mock(this).ref_count;
        count.set(count.get() + 1);
    }
}

hostbind::host_method! {
    fn decrement_reference_count(this: *mut c_void) {
        let count = &mock(this).ref_count;
        count.set(count.get() - 1);
    }
}

hostbind::host_method! {
    fn get_enumeration_id(_this: *mut c_void) -> i32 {
        7
    }
}

hostbind::host_method! {
    fn get_low_res_color_sample(_this: *mut c_void, s: f32, t: f32, color: *mut f32) {
        // SAFETY: the binding passes a `[f32; 3]`.
        unsafe { color.cast::<[f32; 3]>().write([s, t, 1.0]) }
    }
}

hostbind::host_method! {
    fn recompute_state_snapshots(this: *mut c_void) {
        mock(this).record("RecomputeStateSnapshots");
    }
}

hostbind::host_method! {
    fn is_translucent(this: *mut c_void) -> bool {
        mock(this).has_flag(MaterialVarFlags::TRANSLUCENT)
    }
}

hostbind::host_method! {
    fn get_vertex_format(_this: *mut c_void) -> u64 {
        VERTEX_FORMAT
    }
}

hostbind::host_method! {
    fn alpha_modulate(this: *mut c_void, alpha: f32) {
        let mock = mock(this);
        mock.record("AlphaModulate");
        mock.alpha.set(alpha);
    }
}

hostbind::host_method! {
    fn color_modulate(this: *mut c_void, r: f32, g: f32, b: f32) {
        let mock = mock(this);
        mock.record("ColorModulate");
        mock.color.set([r, g, b]);
    }
}

hostbind::host_method! {
    fn set_material_var_flag(this: *mut c_void, flag: u32, on: bool) {
        let mock = mock(this);
        mock.record("SetMaterialVarFlag");
        let flags = mock.flags.get();
        mock.flags.set(if on { flags | flag } else { flags & !flag });
    }
}

hostbind::host_method! {
    fn get_material_var_flag(this: *mut c_void, flag: u32) -> bool {
        mock(this).flags.get() & flag != 0
    }
}

hostbind::host_method! {
    fn get_reflectivity(_this: *mut c_void, reflectivity: *mut Vector) {
        // SAFETY: the binding passes a pointer to its own `Vector`.
        unsafe { *reflectivity = Vector::new(0.2, 0.3, 0.4) }
    }
}

hostbind::host_method! {
    fn get_property_flag(_this: *mut c_void, property: i32) -> bool {
        // Only `Opacity`.
        property == 1
    }
}

hostbind::host_method! {
    fn is_two_sided(this: *mut c_void) -> bool {
        mock(this).has_flag(MaterialVarFlags::NOCULL)
    }
}

hostbind::host_method! {
    fn set_shader(this: *mut c_void, name: *const c_char) {
        let mock = mock(this);
        mock.record("SetShader");
        // SAFETY: the binding passes a `&CStr`; the host keeps its own copy.
        *mock.shader.borrow_mut() = unsafe { CStr::from_ptr(name) }.to_owned();
    }
}

hostbind::host_method! {
    fn get_texture_memory_bytes(_this: *mut c_void) -> i32 {
        4096
    }
}

hostbind::host_method! {
    fn refresh(this: *mut c_void) {
        mock(this).record("Refresh");
    }
}

hostbind::host_method! {
    fn shader_param_count(this: *mut c_void) -> i32 {
        mock(this).params.len() as i32
    }
}

hostbind::host_method! {
    fn get_shader_params(this: *mut c_void) -> *mut *mut MaterialVar {
        mock(this).params.as_ptr().cast_mut()
    }
}

hostbind::host_method! {
    fn set_use_fixed_function_baked_lighting(this: *mut c_void, _enable: bool) {
        mock(this).record("SetUseFixedFunctionBakedLighting");
    }
}

hostbind::host_method! {
    fn get_alpha_modulation(this: *mut c_void) -> f32 {
        mock(this).alpha.get()
    }
}

hostbind::host_method! {
    fn get_color_modulation(this: *mut c_void, r: *mut f32, g: *mut f32, b: *mut f32) {
        let [red, green, blue] = mock(this).color.get();
        // SAFETY: the binding passes pointers to its own locals.
        unsafe {
            *r = red;
            *g = green;
            *b = blue;
        }
    }
}

hostbind::host_method! {
    fn get_morph_format(_this: *mut c_void) -> u32 {
        MORPH_FORMAT
    }
}

hostbind::host_method! {
    fn find_var_fast(this: *mut c_void, name: *const c_char, token: *mut u32) -> *mut MaterialVar {
        let mock = mock(this);
        // SAFETY: the binding passes a `&CStr` and a `&mut u32`.
        unsafe {
            if *token == 0 {
                mock.record("FindVarFast lookup");
                *token = 1;
            }
            if CStr::from_ptr(name) == BASE_TEXTURE {
                mock.var(0)
            } else {
                ptr::null_mut()
            }
        }
    }
}

hostbind::host_method! {
    fn set_shader_and_params(this: *mut c_void, key_values: *mut KeyValues) {
        let mock = mock(this);
        mock.record("SetShaderAndParams");
        mock.key_values.set(key_values);
    }
}

hostbind::host_method! {
    fn get_shader_name(this: *mut c_void) -> *const c_char {
        mock(this).shader.borrow().as_ptr()
    }
}

hostbind::host_method! {
    fn delete_if_unreferenced(this: *mut c_void) {
        mock(this).record("DeleteIfUnreferenced");
    }
}

hostbind::host_method! {
    fn call_bind_proxy(this: *mut c_void, proxy_data: *mut c_void) {
        let mock = mock(this);
        mock.record("CallBindProxy");
        mock.proxy_data.set(proxy_data);
    }
}

hostbind::host_method! {
    fn check_proxy_replacement(_this: *mut c_void, proxy_data: *mut c_void) -> *mut c_void {
        // The mock's proxies replace a material with whatever they were given.
        proxy_data
    }
}

hostbind::host_method! {
    fn refresh_preserving_material_vars(this: *mut c_void) {
        mock(this).record("RefreshPreservingMaterialVars");
    }
}

pub static MOCK_VTABLE: MaterialVTable = MaterialVTable {
    get_name,
    get_texture_group_name,
    get_preview_image_properties,
    get_preview_image,
    get_mapping_width,
    get_mapping_height,
    get_num_animation_frames: one,
    in_material_page: no,
    get_material_offset,
    get_material_scale,
    get_material_page,
    find_var,
    increment_reference_count,
    decrement_reference_count,
    get_enumeration_id,
    get_low_res_color_sample,
    recompute_state_snapshots,
    is_translucent,
    is_alpha_tested: no,
    is_vertex_lit: yes,
    get_vertex_format,
    has_proxy: no,
    uses_env_cubemap: no,
    needs_tangent_space: yes,
    needs_power_of_two_frame_buffer_texture: echo,
    needs_full_frame_buffer_texture: echo,
    needs_software_skinning: no,
    alpha_modulate,
    color_modulate,
    set_material_var_flag,
    get_material_var_flag,
    get_reflectivity,
    get_property_flag,
    is_two_sided,
    set_shader,
    get_num_passes: one,
    get_texture_memory_bytes,
    refresh,
    needs_lightmap_blend_alpha: no,
    needs_software_lighting: no,
    shader_param_count,
    get_shader_params,
    is_error_material: no,
    set_use_fixed_function_baked_lighting,
    get_alpha_modulation,
    get_color_modulation,
    get_morph_format,
    find_var_fast,
    set_shader_and_params,
    get_shader_name,
    delete_if_unreferenced,
    is_sprite_card: no,
    call_bind_proxy,
    check_proxy_replacement,
    refresh_preserving_material_vars,
    was_reloaded_from_whitelist: no,
    is_precached: yes,
};
