// Copyright (C) Microsoft Corporation. All rights reserved.

mod field_tests;

use super::*;
