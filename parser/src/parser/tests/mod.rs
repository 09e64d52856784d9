mod utils;
pub(crate) use self::utils::ParseTest;


use miden_diagnostics::SourceSpan;

use crate::{ast::*, Symbol};

// TEST HELPERS
// ================================================================================================

macro_rules! ident {
    ($name:ident) => {
        crate::ast::Identifier::new(
            miden_diagnostics::SourceSpan::UNKNOWN,
            crate::Symbol::intern(stringify!($name)),
        )
    };
    ($name:literal) => {
        crate::ast::Identifier::new(
            miden_diagnostics::SourceSpan::UNKNOWN,
            crate::Symbol::intern($name),
        )
    };
}
pub(crate) use ident;

fn class(name: Identifier, parent: Option<Identifier>, fields: Vec<Identifier>) -> Declaration {
    Declaration::new(
        SourceSpan::UNKNOWN,
        DeclarationKind::Class,
        name,
        parent,
        fields,
    )
}

fn interface(name: Identifier, parent: Option<Identifier>, fields: Vec<Identifier>) -> Declaration {
    Declaration::new(
        SourceSpan::UNKNOWN,
        DeclarationKind::Interface,
        name,
        parent,
        fields,
    )
}

fn enumeration(name: Identifier) -> Declaration {
    Declaration::named_block(SourceSpan::UNKNOWN, DeclarationKind::Enum, name)
}

fn namespace(name: Identifier) -> Declaration {
    Declaration::named_block(SourceSpan::UNKNOWN, DeclarationKind::Namespace, name)
}

fn import(names: Vec<Identifier>, path: &str) -> ImportEntry {
    ImportEntry::new(SourceSpan::UNKNOWN, names, Symbol::intern(path))
}

fn module(imports: Vec<ImportEntry>, declarations: Vec<Declaration>) -> Module {
    let mut module = Module::new();
    module.imports = imports;
    for declaration in declarations {
        module.declare(declaration);
    }
    module
}

// FULL SOURCE
// ================================================================================================

#[test]
fn port_todo_excerpt() {
    let source = r#"
import { ClipVector } from "@bentley/geometry-core/lib/numerics/ClipVector";
import { Point3d, Vector3d } from "@bentley/geometry-core/lib/PointVector";

import { ColorDef } from "../../common/ColorDef";
import { FloatRgb, FloatPreMulRgba } from "./FloatRGBA";
import { BufferHandle } from "./Handle";

export namespace GLES {}
  // CACHED GEOMETRY
  export class MaterialData {
    a: FloatRgb;
    b: FloatPreMulRgba;
    c: Material;
  }
  export class FeatureIndices {
    a: BufferHandle;
    b: FeatureIndex.Type; // DgnPlatform/PublicAPI/DgnPlatform/Render.h
  }
  export class CachedGeometry {}
  export class IndexedGeometry extends CachedGeometry {
    a: Point3d;
  }
  export class GLESGraphic extends Render.Graphic {
  }
  export const enum SurfaceTechniqueShaderIndex {
    kFlat = 0,
    kCount,
  }
"#;
    let expected = module(
        vec![
            import(
                vec![ident!(ClipVector)],
                "@bentley/geometry-core/lib/numerics/ClipVector",
            ),
            import(
                vec![ident!(Point3d), ident!(Vector3d)],
                "@bentley/geometry-core/lib/PointVector",
            ),
            import(vec![ident!(ColorDef)], "../../common/ColorDef"),
            import(vec![ident!(FloatRgb), ident!(FloatPreMulRgba)], "./FloatRGBA"),
            import(vec![ident!(BufferHandle)], "./Handle"),
        ],
        vec![
            namespace(ident!(GLES)),
            class(
                ident!(MaterialData),
                None,
                vec![ident!(FloatRgb), ident!(FloatPreMulRgba), ident!(Material)],
            ),
            class(
                ident!(FeatureIndices),
                None,
                vec![ident!(BufferHandle), ident!("FeatureIndex.Type")],
            ),
            class(ident!(CachedGeometry), None, vec![]),
            class(
                ident!(IndexedGeometry),
                Some(ident!(CachedGeometry)),
                vec![ident!(Point3d)],
            ),
            class(ident!(GLESGraphic), Some(ident!("Render.Graphic")), vec![]),
            enumeration(ident!(SurfaceTechniqueShaderIndex)),
        ],
    );
    ParseTest::new().expect_module(source, expected);
}

#[test]
fn empty_source() {
    ParseTest::new().expect_module("", Module::new());
    ParseTest::new().expect_module("// nothing to see here\n", Module::new());
}

#[test]
fn sibling_imports_are_internal() {
    let module = ParseTest::new().module(
        r#"
        import { A } from "./A";
        import { B } from "../B";
        import { C } from "c-package";
        "#,
    );
    let internal: Vec<bool> = module.imports.iter().map(|i| i.is_internal).collect();
    assert_eq!(internal, vec![true, false, false]);
}
