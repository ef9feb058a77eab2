use std::ffi::{c_char, c_void};
use std::marker::{PhantomData, PhantomPinned};
use std::mem::size_of;

use hostbind_core::{ImageFormat, MorphFormat, Vector, VertexFormat};
use hostbind_registry::material::SLOT_COUNT;

use crate::dispatch::VTableEntry;

/// A material parameter owned by the host. Only ever handled by pointer.
#[repr(C)]
pub struct MaterialVar {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// A host key-value tree. Only ever handled by pointer.
#[repr(C)]
pub struct KeyValues {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

pub type GetNameFn = crate::host_fn!((*mut c_void) -> *const c_char);
pub type AlphaModulateFn = crate::host_fn!((*mut c_void, f32));
pub type ColorModulateFn = crate::host_fn!((*mut c_void, f32, f32, f32));
pub type SetMaterialVarFlagFn = crate::host_fn!((*mut c_void, u32, bool));

/// The material vtable, one field per slot in host order.
///
/// Slots reached by manual dispatch are declared too: leaving any out would
/// shift every slot after it.
#[repr(C)]
pub struct MaterialVTable {
    pub get_name: GetNameFn,
    pub get_texture_group_name: GetNameFn,
    pub get_preview_image_properties: crate::host_fn!(
        (*mut c_void, *mut i32, *mut i32, *mut ImageFormat, *mut bool) -> i32
    ),
    pub get_preview_image: crate::host_fn!((*mut c_void, *mut u8, i32, i32, ImageFormat) -> i32),
    pub get_mapping_width: crate::host_fn!((*mut c_void) -> i32),
    pub get_mapping_height: crate::host_fn!((*mut c_void) -> i32),
    pub get_num_animation_frames: crate::host_fn!((*mut c_void) -> i32),
    pub in_material_page: crate::host_fn!((*mut c_void) -> bool),
    pub get_material_offset: crate::host_fn!((*mut c_void, *mut f32)),
    pub get_material_scale: crate::host_fn!((*mut c_void, *mut f32)),
    pub get_material_page: crate::host_fn!((*mut c_void) -> *mut c_void),
    pub find_var: crate::host_fn!((*mut c_void, *const c_char, *mut bool, bool) -> *mut MaterialVar),
    pub increment_reference_count: crate::host_fn!((*mut c_void)),
    pub decrement_reference_count: crate::host_fn!((*mut c_void)),
    pub get_enumeration_id: crate::host_fn!((*mut c_void) -> i32),
    pub get_low_res_color_sample: crate::host_fn!((*mut c_void, f32, f32, *mut f32)),
    pub recompute_state_snapshots: crate::host_fn!((*mut c_void)),
    pub is_translucent: crate::host_fn!((*mut c_void) -> bool),
    pub is_alpha_tested: crate::host_fn!((*mut c_void) -> bool),
    pub is_vertex_lit: crate::host_fn!((*mut c_void) -> bool),
    pub get_vertex_format: crate::host_fn!((*mut c_void) -> VertexFormat),
    pub has_proxy: crate::host_fn!((*mut c_void) -> bool),
    pub uses_env_cubemap: crate::host_fn!((*mut c_void) -> bool),
    pub needs_tangent_space: crate::host_fn!((*mut c_void) -> bool),
    pub needs_power_of_two_frame_buffer_texture: crate::host_fn!((*mut c_void, bool) -> bool),
    pub needs_full_frame_buffer_texture: crate::host_fn!((*mut c_void, bool) -> bool),
    pub needs_software_skinning: crate::host_fn!((*mut c_void) -> bool),
    pub alpha_modulate: AlphaModulateFn,
    pub color_modulate: ColorModulateFn,
    pub set_material_var_flag: SetMaterialVarFlagFn,
    pub get_material_var_flag: crate::host_fn!((*mut c_void, u32) -> bool),
    pub get_reflectivity: crate::host_fn!((*mut c_void, *mut Vector)),
    pub get_property_flag: crate::host_fn!((*mut c_void, i32) -> bool),
    pub is_two_sided: crate::host_fn!((*mut c_void) -> bool),
    pub set_shader: crate::host_fn!((*mut c_void, *const c_char)),
    pub get_num_passes: crate::host_fn!((*mut c_void) -> i32),
    pub get_texture_memory_bytes: crate::host_fn!((*mut c_void) -> i32),
    pub refresh: crate::host_fn!((*mut c_void)),
    pub needs_lightmap_blend_alpha: crate::host_fn!((*mut c_void) -> bool),
    pub needs_software_lighting: crate::host_fn!((*mut c_void) -> bool),
    pub shader_param_count: crate::host_fn!((*mut c_void) -> i32),
    pub get_shader_params: crate::host_fn!((*mut c_void) -> *mut *mut MaterialVar),
    pub is_error_material: crate::host_fn!((*mut c_void) -> bool),
    pub set_use_fixed_function_baked_lighting: crate::host_fn!((*mut c_void, bool)),
    pub get_alpha_modulation: crate::host_fn!((*mut c_void) -> f32),
    pub get_color_modulation: crate::host_fn!((*mut c_void, *mut f32, *mut f32, *mut f32)),
    pub get_morph_format: crate::host_fn!((*mut c_void) -> MorphFormat),
    pub find_var_fast: crate::host_fn!((*mut c_void, *const c_char, *mut u32) -> *mut MaterialVar),
    pub set_shader_and_params: crate::host_fn!((*mut c_void, *mut KeyValues)),
    pub get_shader_name: crate::host_fn!((*mut c_void) -> *const c_char),
    pub delete_if_unreferenced: crate::host_fn!((*mut c_void)),
    pub is_sprite_card: crate::host_fn!((*mut c_void) -> bool),
    pub call_bind_proxy: crate::host_fn!((*mut c_void, *mut c_void)),
    pub check_proxy_replacement: crate::host_fn!((*mut c_void, *mut c_void) -> *mut c_void),
    pub refresh_preserving_material_vars: crate::host_fn!((*mut c_void)),
    pub was_reloaded_from_whitelist: crate::host_fn!((*mut c_void) -> bool),
    pub is_precached: crate::host_fn!((*mut c_void) -> bool),
}

const _: () = assert!(size_of::<MaterialVTable>() == SLOT_COUNT * size_of::<VTableEntry>());
