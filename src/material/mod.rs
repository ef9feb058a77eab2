//! The host material interface.
//!
//! [`Material`] wraps a pointer to a host material and exposes its 57
//! virtual methods. Most go through the typed [`MaterialVTable`]; `GetName`,
//! `GetTextureGroupName`, `AlphaModulate`, `ColorModulate` and
//! `SetMaterialVarFlag` are resolved by slot index instead. Which is which
//! is recorded per method in the registry's material catalogue.
//!
//! Nothing returned by the host is owned by the caller. Strings, variables
//! and parameter arrays are borrowed from the material and stay valid until
//! the host changes or releases it.

mod vtable;

use std::ffi::{CStr, c_void};
use std::ptr::NonNull;

use hostbind_core::{
    BindResult, ImageFormat, MaterialPropertyType, MaterialVarFlags, MorphFormat,
    PreviewImageStatus, Vector, VertexFormat,
};
use hostbind_registry::material::{self as catalogue, slots};

use crate::dispatch;
use crate::handle::{ForeignHandle, ForeignInterface};

pub use vtable::{
    AlphaModulateFn, ColorModulateFn, GetNameFn, KeyValues, MaterialVTable, MaterialVar,
    SetMaterialVarFlagFn,
};

/// Marker for the material interface.
pub enum MaterialInterface {}

impl ForeignInterface for MaterialInterface {
    const NAME: &'static str = catalogue::INTERFACE;
    const SLOT_COUNT: usize = catalogue::SLOT_COUNT;
    type VTable = MaterialVTable;
}

/// What `GetPreviewImageProperties` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewImageProperties {
    pub status: PreviewImageStatus,
    pub width: i32,
    pub height: i32,
    pub format: ImageFormat,
    pub is_translucent: bool,
}

/// A host material.
///
/// Copying a `Material` copies the pointer only. Use [`MaterialRef`] to hold
/// a counted reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material(ForeignHandle<MaterialInterface>);

const _: () = assert!(size_of::<Option<Material>>() == size_of::<*mut c_void>());

impl Material {
    /// # Safety
    ///
    /// See [`ForeignHandle::from_raw`]: a non-null `ptr` must be a live host
    /// material that outlives every use of the returned value.
    pub unsafe fn from_raw(ptr: *mut c_void) -> BindResult<Self> {
        unsafe { ForeignHandle::from_raw(ptr) }.map(Self)
    }

    pub fn handle(&self) -> ForeignHandle<MaterialInterface> {
        self.0
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }

    #[inline]
    fn vtable(&self) -> &MaterialVTable {
        self.0.vtable()
    }

    /// Material name, e.g. `debug/debugempty`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn name(&self) -> Option<&CStr> {
        unsafe {
            let get_name: GetNameFn = self.0.method(slots::GET_NAME);
            dispatch::borrow_cstr(get_name(self.as_ptr()))
        }
    }

    /// Texture group the material belongs to.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn texture_group_name(&self) -> Option<&CStr> {
        unsafe {
            let get_group: GetNameFn = self.0.method(slots::GET_TEXTURE_GROUP_NAME);
            dispatch::borrow_cstr(get_group(self.as_ptr()))
        }
    }

    /// Size, format and translucency of the preview image.
    ///
    /// A `Bad` or `NoPreviewImage` status is returned as is; the other fields
    /// then hold whatever the host left in them, starting from zero sizes
    /// and [`ImageFormat::UNKNOWN`].
    pub fn preview_image_properties(&self) -> PreviewImageProperties {
        let (mut width, mut height) = (0, 0);
        let mut format = ImageFormat::default();
        let mut is_translucent = false;
        let status = unsafe {
            (self.vtable().get_preview_image_properties)(
                self.as_ptr(),
                &mut width,
                &mut height,
                &mut format,
                &mut is_translucent,
            )
        };
        PreviewImageProperties {
            status: PreviewImageStatus::from(status),
            width,
            height,
            format,
            is_translucent,
        }
    }

    /// Has the host render the preview image into `data`.
    ///
    /// # Safety
    ///
    /// `data` must be large enough for a `width` x `height` image in
    /// `format`; the host writes that many bytes without checking.
    pub unsafe fn preview_image(
        &self,
        data: &mut [u8],
        width: i32,
        height: i32,
        format: ImageFormat,
    ) -> PreviewImageStatus {
        let status = unsafe {
            (self.vtable().get_preview_image)(
                self.as_ptr(),
                data.as_mut_ptr(),
                width,
                height,
                format,
            )
        };
        PreviewImageStatus::from(status)
    }

    pub fn mapping_width(&self) -> i32 {
        unsafe { (self.vtable().get_mapping_width)(self.as_ptr()) }
    }

    pub fn mapping_height(&self) -> i32 {
        unsafe { (self.vtable().get_mapping_height)(self.as_ptr()) }
    }

    pub fn num_animation_frames(&self) -> i32 {
        unsafe { (self.vtable().get_num_animation_frames)(self.as_ptr()) }
    }

    pub fn in_material_page(&self) -> bool {
        unsafe { (self.vtable().in_material_page)(self.as_ptr()) }
    }

    /// Offset of this material inside its material page.
    pub fn material_offset(&self) -> [f32; 2] {
        let mut offset = [0.0; 2];
        unsafe { (self.vtable().get_material_offset)(self.as_ptr(), offset.as_mut_ptr()) };
        offset
    }

    /// Scale of this material inside its material page.
    pub fn material_scale(&self) -> [f32; 2] {
        let mut scale = [0.0; 2];
        unsafe { (self.vtable().get_material_scale)(self.as_ptr(), scale.as_mut_ptr()) };
        scale
    }

    /// The material page holding this material, if any.
    pub fn material_page(&self) -> Option<Material> {
        let page = unsafe { (self.vtable().get_material_page)(self.as_ptr()) };
        // SAFETY: the host returns either null or one of its live materials.
        unsafe { Material::from_raw(page) }.ok()
    }

    /// Looks a material variable up by name.
    ///
    /// `None` when the host reports the variable as not found. With
    /// `complain` set the host also logs the miss on its side.
    pub fn find_var(&self, name: &CStr, complain: bool) -> Option<NonNull<MaterialVar>> {
        let mut found = false;
        let var = unsafe {
            (self.vtable().find_var)(self.as_ptr(), name.as_ptr(), &mut found, complain)
        };
        if found { NonNull::new(var) } else { None }
    }

    /// Like [`find_var`](Self::find_var), caching the lookup in `token`.
    ///
    /// Start `token` at zero; the host fills it in on the first call.
    pub fn find_var_fast(&self, name: &CStr, token: &mut u32) -> Option<NonNull<MaterialVar>> {
        let var = unsafe { (self.vtable().find_var_fast)(self.as_ptr(), name.as_ptr(), token) };
        NonNull::new(var)
    }

    pub fn increment_reference_count(&self) {
        unsafe { (self.vtable().increment_reference_count)(self.as_ptr()) }
    }

    pub fn decrement_reference_count(&self) {
        unsafe { (self.vtable().decrement_reference_count)(self.as_ptr()) }
    }

    /// Same as [`increment_reference_count`](Self::increment_reference_count).
    #[inline]
    pub fn add_ref(&self) {
        self.increment_reference_count();
    }

    /// Same as [`decrement_reference_count`](Self::decrement_reference_count).
    #[inline]
    pub fn release(&self) {
        self.decrement_reference_count();
    }

    pub fn enumeration_id(&self) -> i32 {
        unsafe { (self.vtable().get_enumeration_id)(self.as_ptr()) }
    }

    /// Low resolution RGB sample at texture coordinates `(s, t)`.
    pub fn low_res_color_sample(&self, s: f32, t: f32) -> [f32; 3] {
        let mut color = [0.0; 3];
        unsafe {
            (self.vtable().get_low_res_color_sample)(self.as_ptr(), s, t, color.as_mut_ptr())
        };
        color
    }

    pub fn recompute_state_snapshots(&self) {
        unsafe { (self.vtable().recompute_state_snapshots)(self.as_ptr()) }
    }

    pub fn is_translucent(&self) -> bool {
        unsafe { (self.vtable().is_translucent)(self.as_ptr()) }
    }

    pub fn is_alpha_tested(&self) -> bool {
        unsafe { (self.vtable().is_alpha_tested)(self.as_ptr()) }
    }

    pub fn is_vertex_lit(&self) -> bool {
        unsafe { (self.vtable().is_vertex_lit)(self.as_ptr()) }
    }

    pub fn vertex_format(&self) -> VertexFormat {
        unsafe { (self.vtable().get_vertex_format)(self.as_ptr()) }
    }

    pub fn has_proxy(&self) -> bool {
        unsafe { (self.vtable().has_proxy)(self.as_ptr()) }
    }

    pub fn uses_env_cubemap(&self) -> bool {
        unsafe { (self.vtable().uses_env_cubemap)(self.as_ptr()) }
    }

    pub fn needs_tangent_space(&self) -> bool {
        unsafe { (self.vtable().needs_tangent_space)(self.as_ptr()) }
    }

    pub fn needs_power_of_two_frame_buffer_texture(&self, check_specific_to_this_frame: bool) -> bool {
        unsafe {
            (self.vtable().needs_power_of_two_frame_buffer_texture)(
                self.as_ptr(),
                check_specific_to_this_frame,
            )
        }
    }

    pub fn needs_full_frame_buffer_texture(&self, check_specific_to_this_frame: bool) -> bool {
        unsafe {
            (self.vtable().needs_full_frame_buffer_texture)(self.as_ptr(), check_specific_to_this_frame)
        }
    }

    pub fn needs_software_skinning(&self) -> bool {
        unsafe { (self.vtable().needs_software_skinning)(self.as_ptr()) }
    }

    /// Sets the alpha modulation, `0.0` transparent to `1.0` opaque.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn alpha_modulate(&self, alpha: f32) {
        unsafe {
            let alpha_modulate: AlphaModulateFn = self.0.method(slots::ALPHA_MODULATE);
            alpha_modulate(self.as_ptr(), alpha);
        }
    }

    /// Sets the color modulation.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn color_modulate(&self, r: f32, g: f32, b: f32) {
        unsafe {
            let color_modulate: ColorModulateFn = self.0.method(slots::COLOR_MODULATE);
            color_modulate(self.as_ptr(), r, g, b);
        }
    }

    /// Switches one material var flag on or off.
    ///
    /// The host takes a single flag per call. A set with no flags or with
    /// several is rejected before anything reaches the host.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn set_material_var_flag(&self, flag: MaterialVarFlags, on: bool) -> BindResult<()> {
        let bit = flag.single_bit()?;
        unsafe {
            let set_flag: SetMaterialVarFlagFn = self.0.method(slots::SET_MATERIAL_VAR_FLAG);
            set_flag(self.as_ptr(), bit, on);
        }
        Ok(())
    }

    /// Whether a single material var flag is set.
    pub fn material_var_flag(&self, flag: MaterialVarFlags) -> BindResult<bool> {
        let bit = flag.single_bit()?;
        Ok(unsafe { (self.vtable().get_material_var_flag)(self.as_ptr(), bit) })
    }

    /// Reflectivity as an RGB vector.
    pub fn reflectivity(&self) -> Vector {
        let mut reflectivity = Vector::ZERO;
        unsafe { (self.vtable().get_reflectivity)(self.as_ptr(), &mut reflectivity) };
        reflectivity
    }

    pub fn property_flag(&self, property: MaterialPropertyType) -> bool {
        unsafe { (self.vtable().get_property_flag)(self.as_ptr(), property.into()) }
    }

    pub fn is_two_sided(&self) -> bool {
        unsafe { (self.vtable().is_two_sided)(self.as_ptr()) }
    }

    /// Replaces the material's shader. The host copies `shader_name`.
    pub fn set_shader(&self, shader_name: &CStr) {
        unsafe { (self.vtable().set_shader)(self.as_ptr(), shader_name.as_ptr()) }
    }

    pub fn num_passes(&self) -> i32 {
        unsafe { (self.vtable().get_num_passes)(self.as_ptr()) }
    }

    pub fn texture_memory_bytes(&self) -> i32 {
        unsafe { (self.vtable().get_texture_memory_bytes)(self.as_ptr()) }
    }

    /// Reloads the material from disk.
    pub fn refresh(&self) {
        unsafe { (self.vtable().refresh)(self.as_ptr()) }
    }

    pub fn needs_lightmap_blend_alpha(&self) -> bool {
        unsafe { (self.vtable().needs_lightmap_blend_alpha)(self.as_ptr()) }
    }

    pub fn needs_software_lighting(&self) -> bool {
        unsafe { (self.vtable().needs_software_lighting)(self.as_ptr()) }
    }

    pub fn shader_param_count(&self) -> i32 {
        unsafe { (self.vtable().shader_param_count)(self.as_ptr()) }
    }

    /// The shader's parameters, [`shader_param_count`](Self::shader_param_count) of them.
    pub fn shader_params(&self) -> &[Option<NonNull<MaterialVar>>] {
        let count = self.shader_param_count();
        unsafe {
            let params = (self.vtable().get_shader_params)(self.as_ptr());
            dispatch::borrow_slice(params.cast_const().cast(), count)
        }
    }

    pub fn is_error_material(&self) -> bool {
        unsafe { (self.vtable().is_error_material)(self.as_ptr()) }
    }

    pub fn set_use_fixed_function_baked_lighting(&self, enable: bool) {
        unsafe { (self.vtable().set_use_fixed_function_baked_lighting)(self.as_ptr(), enable) }
    }

    pub fn alpha_modulation(&self) -> f32 {
        unsafe { (self.vtable().get_alpha_modulation)(self.as_ptr()) }
    }

    pub fn color_modulation(&self) -> [f32; 3] {
        let [mut r, mut g, mut b] = [0.0f32; 3];
        unsafe { (self.vtable().get_color_modulation)(self.as_ptr(), &mut r, &mut g, &mut b) };
        [r, g, b]
    }

    pub fn morph_format(&self) -> MorphFormat {
        unsafe { (self.vtable().get_morph_format)(self.as_ptr()) }
    }

    /// Replaces shader and parameters in one go.
    ///
    /// # Safety
    ///
    /// `key_values` must be null or a host key-value tree that stays alive
    /// for the duration of the call.
    pub unsafe fn set_shader_and_params(&self, key_values: *mut KeyValues) {
        unsafe { (self.vtable().set_shader_and_params)(self.as_ptr(), key_values) }
    }

    pub fn shader_name(&self) -> Option<&CStr> {
        unsafe { dispatch::borrow_cstr((self.vtable().get_shader_name)(self.as_ptr())) }
    }

    /// Asks the host to delete the material if nothing references it.
    ///
    /// # Safety
    ///
    /// The material may be gone when this returns. Neither this value nor
    /// any copy of it may be used afterwards unless the caller knows a
    /// reference is still held.
    pub unsafe fn delete_if_unreferenced(&self) {
        unsafe { (self.vtable().delete_if_unreferenced)(self.as_ptr()) }
    }

    pub fn is_sprite_card(&self) -> bool {
        unsafe { (self.vtable().is_sprite_card)(self.as_ptr()) }
    }

    /// Runs the material's proxies.
    ///
    /// # Safety
    ///
    /// `proxy_data` must be whatever the host's proxies expect, usually the
    /// entity being rendered.
    pub unsafe fn call_bind_proxy(&self, proxy_data: *mut c_void) {
        unsafe { (self.vtable().call_bind_proxy)(self.as_ptr(), proxy_data) }
    }

    /// The material a proxy wants drawn instead of this one.
    ///
    /// # Safety
    ///
    /// As for [`call_bind_proxy`](Self::call_bind_proxy).
    pub unsafe fn check_proxy_replacement(&self, proxy_data: *mut c_void) -> Option<Material> {
        unsafe {
            let replacement = (self.vtable().check_proxy_replacement)(self.as_ptr(), proxy_data);
            Material::from_raw(replacement).ok()
        }
    }

    pub fn refresh_preserving_material_vars(&self) {
        unsafe { (self.vtable().refresh_preserving_material_vars)(self.as_ptr()) }
    }

    pub fn was_reloaded_from_whitelist(&self) -> bool {
        unsafe { (self.vtable().was_reloaded_from_whitelist)(self.as_ptr()) }
    }

    pub fn is_precached(&self) -> bool {
        unsafe { (self.vtable().is_precached)(self.as_ptr()) }
    }
}

/// A counted reference to a host material.
///
/// Acquiring or cloning calls [`Material::add_ref`], dropping calls
/// [`Material::release`]. The count itself lives in the host and is never
/// read here.
#[derive(Debug, PartialEq, Eq)]
pub struct MaterialRef(Material);

impl MaterialRef {
    pub fn new(material: Material) -> Self {
        material.add_ref();
        Self(material)
    }

    pub fn material(&self) -> Material {
        self.0
    }

    /// Gives up the reference without releasing it.
    pub fn into_inner(self) -> Material {
        let material = self.0;
        std::mem::forget(self);
        material
    }
}

impl std::ops::Deref for MaterialRef {
    type Target = Material;

    fn deref(&self) -> &Material {
        &self.0
    }
}

impl Clone for MaterialRef {
    fn clone(&self) -> Self {
        Self::new(self.0)
    }
}

impl Drop for MaterialRef {
    fn drop(&mut self) {
        self.0.release();
    }
}
