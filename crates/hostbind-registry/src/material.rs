//! Method table and vtable fixture for the host material interface.
//!
//! Slot numbers below were reverse-engineered from
//! [`HostBuild::SOURCE_2013_MATERIAL`]. They hold for that build only.

use hostbind_core::AbiType::{self, Bool, CStr, Enum, F32, I32, OutPtr, Ptr, U32, U64, Void};
use hostbind_core::{CallSignature, SlotIndex};

use crate::{BindingConfig, DispatchKind, HostBuild, MethodTable, RegistryResult, VTableFixture};

pub const INTERFACE: &str = "IMaterial";

/// Number of slots in the material vtable, `0..=56`.
pub const SLOT_COUNT: usize = 57;

/// Slot of every material method, in host declaration order.
pub mod slots {
    use hostbind_core::SlotIndex;

    pub const GET_NAME: SlotIndex = SlotIndex::new(0);
    pub const GET_TEXTURE_GROUP_NAME: SlotIndex = SlotIndex::new(1);
    pub const GET_PREVIEW_IMAGE_PROPERTIES: SlotIndex = SlotIndex::new(2);
    pub const GET_PREVIEW_IMAGE: SlotIndex = SlotIndex::new(3);
    pub const GET_MAPPING_WIDTH: SlotIndex = SlotIndex::new(4);
    pub const GET_MAPPING_HEIGHT: SlotIndex = SlotIndex::new(5);
    pub const GET_NUM_ANIMATION_FRAMES: SlotIndex = SlotIndex::new(6);
    pub const IN_MATERIAL_PAGE: SlotIndex = SlotIndex::new(7);
    pub const GET_MATERIAL_OFFSET: SlotIndex = SlotIndex::new(8);
    pub const GET_MATERIAL_SCALE: SlotIndex = SlotIndex::new(9);
    pub const GET_MATERIAL_PAGE: SlotIndex = SlotIndex::new(10);
    pub const FIND_VAR: SlotIndex = SlotIndex::new(11);
    pub const INCREMENT_REFERENCE_COUNT: SlotIndex = SlotIndex::new(12);
    pub const DECREMENT_REFERENCE_COUNT: SlotIndex = SlotIndex::new(13);
    pub const GET_ENUMERATION_ID: SlotIndex = SlotIndex::new(14);
    pub const GET_LOW_RES_COLOR_SAMPLE: SlotIndex = SlotIndex::new(15);
    pub const RECOMPUTE_STATE_SNAPSHOTS: SlotIndex = SlotIndex::new(16);
    pub const IS_TRANSLUCENT: SlotIndex = SlotIndex::new(17);
    pub const IS_ALPHA_TESTED: SlotIndex = SlotIndex::new(18);
    pub const IS_VERTEX_LIT: SlotIndex = SlotIndex::new(19);
    pub const GET_VERTEX_FORMAT: SlotIndex = SlotIndex::new(20);
    pub const HAS_PROXY: SlotIndex = SlotIndex::new(21);
    pub const USES_ENV_CUBEMAP: SlotIndex = SlotIndex::new(22);
    pub const NEEDS_TANGENT_SPACE: SlotIndex = SlotIndex::new(23);
    pub const NEEDS_POWER_OF_TWO_FRAME_BUFFER_TEXTURE: SlotIndex = SlotIndex::new(24);
    pub const NEEDS_FULL_FRAME_BUFFER_TEXTURE: SlotIndex = SlotIndex::new(25);
    pub const NEEDS_SOFTWARE_SKINNING: SlotIndex = SlotIndex::new(26);
    pub const ALPHA_MODULATE: SlotIndex = SlotIndex::new(27);
    pub const COLOR_MODULATE: SlotIndex = SlotIndex::new(28);
    pub const SET_MATERIAL_VAR_FLAG: SlotIndex = SlotIndex::new(29);
    pub const GET_MATERIAL_VAR_FLAG: SlotIndex = SlotIndex::new(30);
    pub const GET_REFLECTIVITY: SlotIndex = SlotIndex::new(31);
    pub const GET_PROPERTY_FLAG: SlotIndex = SlotIndex::new(32);
    pub const IS_TWO_SIDED: SlotIndex = SlotIndex::new(33);
    pub const SET_SHADER: SlotIndex = SlotIndex::new(34);
    pub const GET_NUM_PASSES: SlotIndex = SlotIndex::new(35);
    pub const GET_TEXTURE_MEMORY_BYTES: SlotIndex = SlotIndex::new(36);
    pub const REFRESH: SlotIndex = SlotIndex::new(37);
    pub const NEEDS_LIGHTMAP_BLEND_ALPHA: SlotIndex = SlotIndex::new(38);
    pub const NEEDS_SOFTWARE_LIGHTING: SlotIndex = SlotIndex::new(39);
    pub const SHADER_PARAM_COUNT: SlotIndex = SlotIndex::new(40);
    pub const GET_SHADER_PARAMS: SlotIndex = SlotIndex::new(41);
    pub const IS_ERROR_MATERIAL: SlotIndex = SlotIndex::new(42);
    pub const SET_USE_FIXED_FUNCTION_BAKED_LIGHTING: SlotIndex = SlotIndex::new(43);
    pub const GET_ALPHA_MODULATION: SlotIndex = SlotIndex::new(44);
    pub const GET_COLOR_MODULATION: SlotIndex = SlotIndex::new(45);
    pub const GET_MORPH_FORMAT: SlotIndex = SlotIndex::new(46);
    pub const FIND_VAR_FAST: SlotIndex = SlotIndex::new(47);
    pub const SET_SHADER_AND_PARAMS: SlotIndex = SlotIndex::new(48);
    pub const GET_SHADER_NAME: SlotIndex = SlotIndex::new(49);
    pub const DELETE_IF_UNREFERENCED: SlotIndex = SlotIndex::new(50);
    pub const IS_SPRITE_CARD: SlotIndex = SlotIndex::new(51);
    pub const CALL_BIND_PROXY: SlotIndex = SlotIndex::new(52);
    pub const CHECK_PROXY_REPLACEMENT: SlotIndex = SlotIndex::new(53);
    pub const REFRESH_PRESERVING_MATERIAL_VARS: SlotIndex = SlotIndex::new(54);
    pub const WAS_RELOADED_FROM_WHITELIST: SlotIndex = SlotIndex::new(55);
    pub const IS_PRECACHED: SlotIndex = SlotIndex::new(56);
}

struct MethodDecl {
    name: &'static str,
    slot: SlotIndex,
    return_type: AbiType,
    params: &'static [AbiType],
    is_const: bool,
    dispatch: DispatchKind,
}

impl MethodDecl {
    const fn direct(
        name: &'static str,
        slot: SlotIndex,
        return_type: AbiType,
        params: &'static [AbiType],
    ) -> Self {
        Self {
            name,
            slot,
            return_type,
            params,
            is_const: false,
            dispatch: DispatchKind::Direct,
        }
    }

    const fn manual(self) -> Self {
        Self {
            dispatch: DispatchKind::Manual,
            ..self
        }
    }

    const fn constant(self) -> Self {
        Self {
            is_const: true,
            ..self
        }
    }

    fn signature(&self) -> CallSignature {
        if self.is_const {
            CallSignature::const_method(self.return_type, self.params)
        } else {
            CallSignature::method(self.return_type, self.params)
        }
    }
}

#[rustfmt::skip]
const METHODS: [MethodDecl; SLOT_COUNT] = [
    MethodDecl::direct("GetName", slots::GET_NAME, CStr, &[]).manual().constant(),
    MethodDecl::direct("GetTextureGroupName", slots::GET_TEXTURE_GROUP_NAME, CStr, &[]).manual().constant(),
    MethodDecl::direct("GetPreviewImageProperties", slots::GET_PREVIEW_IMAGE_PROPERTIES, Enum, &[OutPtr, OutPtr, OutPtr, OutPtr]).constant(),
    MethodDecl::direct("GetPreviewImage", slots::GET_PREVIEW_IMAGE, Enum, &[OutPtr, I32, I32, Enum]).constant(),
    MethodDecl::direct("GetMappingWidth", slots::GET_MAPPING_WIDTH, I32, &[]),
    MethodDecl::direct("GetMappingHeight", slots::GET_MAPPING_HEIGHT, I32, &[]),
    MethodDecl::direct("GetNumAnimationFrames", slots::GET_NUM_ANIMATION_FRAMES, I32, &[]),
    MethodDecl::direct("InMaterialPage", slots::IN_MATERIAL_PAGE, Bool, &[]),
    MethodDecl::direct("GetMaterialOffset", slots::GET_MATERIAL_OFFSET, Void, &[OutPtr]),
    MethodDecl::direct("GetMaterialScale", slots::GET_MATERIAL_SCALE, Void, &[OutPtr]),
    MethodDecl::direct("GetMaterialPage", slots::GET_MATERIAL_PAGE, Ptr, &[]),
    MethodDecl::direct("FindVar", slots::FIND_VAR, Ptr, &[CStr, OutPtr, Bool]),
    MethodDecl::direct("IncrementReferenceCount", slots::INCREMENT_REFERENCE_COUNT, Void, &[]),
    MethodDecl::direct("DecrementReferenceCount", slots::DECREMENT_REFERENCE_COUNT, Void, &[]),
    MethodDecl::direct("GetEnumerationID", slots::GET_ENUMERATION_ID, I32, &[]).constant(),
    MethodDecl::direct("GetLowResColorSample", slots::GET_LOW_RES_COLOR_SAMPLE, Void, &[F32, F32, OutPtr]).constant(),
    MethodDecl::direct("RecomputeStateSnapshots", slots::RECOMPUTE_STATE_SNAPSHOTS, Void, &[]),
    MethodDecl::direct("IsTranslucent", slots::IS_TRANSLUCENT, Bool, &[]),
    MethodDecl::direct("IsAlphaTested", slots::IS_ALPHA_TESTED, Bool, &[]),
    MethodDecl::direct("IsVertexLit", slots::IS_VERTEX_LIT, Bool, &[]),
    MethodDecl::direct("GetVertexFormat", slots::GET_VERTEX_FORMAT, U64, &[]).constant(),
    MethodDecl::direct("HasProxy", slots::HAS_PROXY, Bool, &[]).constant(),
    MethodDecl::direct("UsesEnvCubemap", slots::USES_ENV_CUBEMAP, Bool, &[]),
    MethodDecl::direct("NeedsTangentSpace", slots::NEEDS_TANGENT_SPACE, Bool, &[]),
    MethodDecl::direct("NeedsPowerOfTwoFrameBufferTexture", slots::NEEDS_POWER_OF_TWO_FRAME_BUFFER_TEXTURE, Bool, &[Bool]),
    MethodDecl::direct("NeedsFullFrameBufferTexture", slots::NEEDS_FULL_FRAME_BUFFER_TEXTURE, Bool, &[Bool]),
    MethodDecl::direct("NeedsSoftwareSkinning", slots::NEEDS_SOFTWARE_SKINNING, Bool, &[]),
    MethodDecl::direct("AlphaModulate", slots::ALPHA_MODULATE, Void, &[F32]).manual(),
    MethodDecl::direct("ColorModulate", slots::COLOR_MODULATE, Void, &[F32, F32, F32]).manual(),
    MethodDecl::direct("SetMaterialVarFlag", slots::SET_MATERIAL_VAR_FLAG, Void, &[Enum, Bool]).manual(),
    MethodDecl::direct("GetMaterialVarFlag", slots::GET_MATERIAL_VAR_FLAG, Bool, &[Enum]).constant(),
    MethodDecl::direct("GetReflectivity", slots::GET_REFLECTIVITY, Void, &[OutPtr]),
    MethodDecl::direct("GetPropertyFlag", slots::GET_PROPERTY_FLAG, Bool, &[Enum]),
    MethodDecl::direct("IsTwoSided", slots::IS_TWO_SIDED, Bool, &[]),
    MethodDecl::direct("SetShader", slots::SET_SHADER, Void, &[CStr]),
    MethodDecl::direct("GetNumPasses", slots::GET_NUM_PASSES, I32, &[]),
    MethodDecl::direct("GetTextureMemoryBytes", slots::GET_TEXTURE_MEMORY_BYTES, I32, &[]),
    MethodDecl::direct("Refresh", slots::REFRESH, Void, &[]),
    MethodDecl::direct("NeedsLightmapBlendAlpha", slots::NEEDS_LIGHTMAP_BLEND_ALPHA, Bool, &[]),
    MethodDecl::direct("NeedsSoftwareLighting", slots::NEEDS_SOFTWARE_LIGHTING, Bool, &[]),
    MethodDecl::direct("ShaderParamCount", slots::SHADER_PARAM_COUNT, I32, &[]).constant(),
    MethodDecl::direct("GetShaderParams", slots::GET_SHADER_PARAMS, Ptr, &[]),
    MethodDecl::direct("IsErrorMaterial", slots::IS_ERROR_MATERIAL, Bool, &[]).constant(),
    MethodDecl::direct("SetUseFixedFunctionBakedLighting", slots::SET_USE_FIXED_FUNCTION_BAKED_LIGHTING, Void, &[Bool]),
    MethodDecl::direct("GetAlphaModulation", slots::GET_ALPHA_MODULATION, F32, &[]),
    MethodDecl::direct("GetColorModulation", slots::GET_COLOR_MODULATION, Void, &[OutPtr, OutPtr, OutPtr]),
    MethodDecl::direct("GetMorphFormat", slots::GET_MORPH_FORMAT, U32, &[]).constant(),
    MethodDecl::direct("FindVarFast", slots::FIND_VAR_FAST, Ptr, &[CStr, OutPtr]),
    MethodDecl::direct("SetShaderAndParams", slots::SET_SHADER_AND_PARAMS, Void, &[Ptr]),
    MethodDecl::direct("GetShaderName", slots::GET_SHADER_NAME, CStr, &[]).constant(),
    MethodDecl::direct("DeleteIfUnreferenced", slots::DELETE_IF_UNREFERENCED, Void, &[]),
    MethodDecl::direct("IsSpriteCard", slots::IS_SPRITE_CARD, Bool, &[]),
    MethodDecl::direct("CallBindProxy", slots::CALL_BIND_PROXY, Void, &[Ptr]),
    MethodDecl::direct("CheckProxyReplacement", slots::CHECK_PROXY_REPLACEMENT, Ptr, &[Ptr]),
    MethodDecl::direct("RefreshPreservingMaterialVars", slots::REFRESH_PRESERVING_MATERIAL_VARS, Void, &[]),
    MethodDecl::direct("WasReloadedFromWhitelist", slots::WAS_RELOADED_FROM_WHITELIST, Bool, &[]),
    MethodDecl::direct("IsPrecached", slots::IS_PRECACHED, Bool, &[]).constant(),
];

/// The material method table pinned to [`HostBuild::SOURCE_2013_MATERIAL`]
/// with strict validation.
pub fn catalogue() -> RegistryResult<MethodTable> {
    catalogue_with(BindingConfig::new(HostBuild::SOURCE_2013_MATERIAL))
}

/// The material method table under a caller-supplied config.
///
/// The slots are the same whatever `config.build` says; pinning them to a
/// different build only makes sense for testing the validation itself.
pub fn catalogue_with(config: BindingConfig) -> RegistryResult<MethodTable> {
    let mut table = MethodTable::new(config);
    for decl in &METHODS {
        table.register(INTERFACE, decl.name, decl.slot, decl.signature(), decl.dispatch)?;
    }

    tracing::debug!(
        interface = INTERFACE,
        build = %table.build(),
        slots = table.slot_count(INTERFACE),
        fingerprint = table.fingerprint(INTERFACE)?,
        "material method table built"
    );
    Ok(table)
}

/// The material vtable as laid out by [`HostBuild::SOURCE_2013_MATERIAL`].
pub fn fixture() -> VTableFixture {
    VTableFixture::new(
        INTERFACE,
        HostBuild::SOURCE_2013_MATERIAL,
        [
            "GetName",
            "GetTextureGroupName",
            "GetPreviewImageProperties",
            "GetPreviewImage",
            "GetMappingWidth",
            "GetMappingHeight",
            "GetNumAnimationFrames",
            "InMaterialPage",
            "GetMaterialOffset",
            "GetMaterialScale",
            "GetMaterialPage",
            "FindVar",
            "IncrementReferenceCount",
            "DecrementReferenceCount",
            "GetEnumerationID",
            "GetLowResColorSample",
            "RecomputeStateSnapshots",
            "IsTranslucent",
            "IsAlphaTested",
            "IsVertexLit",
            "GetVertexFormat",
            "HasProxy",
            "UsesEnvCubemap",
            "NeedsTangentSpace",
            "NeedsPowerOfTwoFrameBufferTexture",
            "NeedsFullFrameBufferTexture",
            "NeedsSoftwareSkinning",
            "AlphaModulate",
            "ColorModulate",
            "SetMaterialVarFlag",
            "GetMaterialVarFlag",
            "GetReflectivity",
            "GetPropertyFlag",
            "IsTwoSided",
            "SetShader",
            "GetNumPasses",
            "GetTextureMemoryBytes",
            "Refresh",
            "NeedsLightmapBlendAlpha",
            "NeedsSoftwareLighting",
            "ShaderParamCount",
            "GetShaderParams",
            "IsErrorMaterial",
            "SetUseFixedFunctionBakedLighting",
            "GetAlphaModulation",
            "GetColorModulation",
            "GetMorphFormat",
            "FindVarFast",
            "SetShaderAndParams",
            "GetShaderName",
            "DeleteIfUnreferenced",
            "IsSpriteCard",
            "CallBindProxy",
            "CheckProxyReplacement",
            "RefreshPreservingMaterialVars",
            "WasReloadedFromWhitelist",
            "IsPrecached",
        ],
    )
}
